/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * Verifies email and password, then sets the encrypted session token as
 * the `loginToken` cookie. Unknown email and wrong password produce an
 * identical 401 so the endpoint leaks nothing about which emails exist.
 */

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Json, Response};

use crate::auth::handlers::types::LoginRequest;
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = state.auth.login(&request.email, &request.password).await?;
    let token = state.auth.issue_token(&user)?;

    tracing::info!("user logged in: {}", user.email);

    let headers = AppendHeaders([(SET_COOKIE, state.config.cookie.set_value(&token))]);
    Ok((headers, Json(user)).into_response())
}
