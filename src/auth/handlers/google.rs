/**
 * Google Login Handler
 *
 * POST /api/auth/google
 *
 * Accepts the profile handed over by the client-side Google sign-in
 * flow. First login creates a federated account; later logins (or an
 * existing local account with the same email) resolve to the stored
 * user. Sets the session cookie like local login does.
 */

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Json, Response};

use crate::auth::GoogleProfile;
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn login_with_google(
    State(state): State<AppState>,
    Json(profile): Json<GoogleProfile>,
) -> Result<Response, ApiError> {
    let user = state.auth.login_with_google(profile).await?;
    let token = state.auth.issue_token(&user)?;

    tracing::info!("google login: {}", user.email);

    let headers = AppendHeaders([(SET_COOKIE, state.config.cookie.set_value(&token))]);
    Ok((headers, Json(user)).into_response())
}
