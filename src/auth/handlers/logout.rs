/**
 * Logout Handler
 *
 * POST /api/auth/logout
 *
 * Sessions are stateless, so logout is purely client-side: the cookie
 * is expired and the (still technically valid) token is forgotten.
 */

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Json, Response};
use serde_json::json;

use crate::server::state::AppState;

pub async fn logout(State(state): State<AppState>) -> Response {
    let headers = AppendHeaders([(SET_COOKIE, state.config.cookie.clear_value())]);
    (headers, Json(json!({ "msg": "Logged out successfully" }))).into_response()
}
