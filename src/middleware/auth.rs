/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user:
 *
 * 1. Pulls the `loginToken` cookie off the request
 * 2. Decrypts it via the auth service (None = unauthenticated)
 * 3. Attaches the identity claims to request extensions
 *
 * Identity is attached for handlers to read, not enforced as ownership;
 * any authenticated user may operate on any board.
 */

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::server::state::AppState;

/// Identity claims of the authenticated requester
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub fullname: String,
    pub is_admin: bool,
}

/// Require a valid session token; 401 otherwise
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookie_header = request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = cookie_value(cookie_header, &state.config.cookie.name)
        .ok_or_else(|| ApiError::auth("Not authenticated"))?;

    let claims = state
        .auth
        .validate_token(&token)
        .ok_or_else(|| ApiError::auth("Not authenticated"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        fullname: claims.fullname,
        is_admin: claims.is_admin,
    });

    Ok(next.run(request).await)
}

/// Extract a named cookie's value from a Cookie header
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Extractor for the identity attached by [`require_auth`]
///
/// Usable as a handler parameter on any protected route.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::auth("Not authenticated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cookie_value_single() {
        assert_eq!(
            cookie_value("loginToken=abc123", "loginToken"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_value_among_many() {
        let header = "theme=dark; loginToken=abc123; _ga=GA1.2";
        assert_eq!(
            cookie_value(header, "loginToken"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_value_missing() {
        assert_eq!(cookie_value("theme=dark", "loginToken"), None);
        assert_eq!(cookie_value("", "loginToken"), None);
    }

    #[test]
    fn test_cookie_name_is_exact_match() {
        assert_eq!(cookie_value("xloginToken=abc", "loginToken"), None);
    }
}
