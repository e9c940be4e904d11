/**
 * Auth Module
 *
 * Authentication for the board backend:
 *
 * - `vault` - password hashing and encrypted session tokens
 * - `service` - signup / login / Google login / token issuance
 * - `handlers` - the HTTP surface under /api/auth
 *
 * Sessions are stateless: the encrypted token in the `loginToken` cookie
 * is the only session state, validated on every authenticated request.
 */

pub mod handlers;
pub mod service;
pub mod vault;

pub use service::{AuthSessionService, GoogleProfile};
pub use vault::{CredentialVault, TokenClaims};
