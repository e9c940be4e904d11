/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * Creates a local account and logs it straight in (cookie set in the
 * same response). A taken email is a 409 with the body the frontend
 * matches on: {"err": "Email taken"}.
 *
 * Never log the password - not even at debug level.
 */

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Json, Response};

use crate::auth::handlers::types::SignupRequest;
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .auth
        .signup(
            &request.email,
            &request.password,
            &request.fullname,
            &request.img_url,
        )
        .await?;
    let token = state.auth.issue_token(&user)?;

    tracing::info!("new account created: {}", user.email);

    let headers = AppendHeaders([(SET_COOKIE, state.config.cookie.set_value(&token))]);
    Ok((headers, Json(user)).into_response())
}
