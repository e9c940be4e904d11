/**
 * Auth Handler Types
 *
 * Request bodies for the auth endpoints. Responses are the shared
 * `UserView` (password hash stripped) plus the Set-Cookie header.
 */

use serde::Deserialize;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub img_url: String,
}
