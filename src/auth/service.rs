/**
 * Auth Session Service
 *
 * Orchestrates signup, login, and Google-federated login over the
 * credential vault and the user directory. Every call is independent;
 * there is no server-side session state.
 */

use std::sync::Arc;

use serde::Deserialize;

use crate::auth::vault::{CredentialVault, TokenClaims};
use crate::error::ApiError;
use crate::user::{AuthProvider, UserDirectory, UserRecord, UserView};

/// Identical message for unknown email and wrong password, so a caller
/// cannot probe which emails are registered.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Profile handed over by the Google sign-in flow
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub google_id: String,
    #[serde(default)]
    pub img_url: String,
}

pub struct AuthSessionService {
    vault: Arc<CredentialVault>,
    users: Arc<dyn UserDirectory>,
}

impl AuthSessionService {
    pub fn new(vault: Arc<CredentialVault>, users: Arc<dyn UserDirectory>) -> Self {
        Self { vault, users }
    }

    /// Register a local account
    ///
    /// Fails with `Validation` when email, password, or fullname is
    /// missing, and with `Conflict` when the email is already taken.
    /// The returned user never carries the password hash.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        fullname: &str,
        img_url: &str,
    ) -> Result<UserView, ApiError> {
        if email.is_empty() || password.is_empty() || fullname.is_empty() {
            return Err(ApiError::validation("Missing details"));
        }
        tracing::debug!("signup with email: {}", email);

        if self.users.get_by_email(email).await?.is_some() {
            return Err(ApiError::conflict("Email taken"));
        }

        let hash = self.vault.hash_password(password)?;
        let record = UserRecord {
            id: None,
            email: email.to_string(),
            password_hash: Some(hash),
            fullname: fullname.to_string(),
            img_url: img_url.to_string(),
            auth_provider: AuthProvider::Local,
            google_id: None,
            is_admin: false,
        };
        let created = self.users.insert(record).await?;
        Ok(created.into())
    }

    /// Authenticate a local account
    ///
    /// Unknown email, federated account without a password, and wrong
    /// password all fail with the same `Auth` error.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserView, ApiError> {
        tracing::debug!("login with email: {}", email);

        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| ApiError::auth(INVALID_CREDENTIALS))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| ApiError::auth(INVALID_CREDENTIALS))?;

        if !self.vault.verify_password(password, hash) {
            return Err(ApiError::auth(INVALID_CREDENTIALS));
        }

        Ok(user.into())
    }

    /// Authenticate or register via Google
    ///
    /// First federated login creates the account with no password. An
    /// existing account with the same email is returned as-is: no
    /// re-linking and no googleId update on local accounts.
    pub async fn login_with_google(&self, profile: GoogleProfile) -> Result<UserView, ApiError> {
        if profile.email.is_empty() || profile.google_id.is_empty() {
            return Err(ApiError::validation("Missing Google user details"));
        }
        tracing::debug!("google login: {}", profile.email);

        if let Some(user) = self.users.get_by_email(&profile.email).await? {
            return Ok(user.into());
        }

        let record = UserRecord {
            id: None,
            email: profile.email,
            password_hash: None,
            fullname: profile.fullname,
            img_url: profile.img_url,
            auth_provider: AuthProvider::Google,
            google_id: Some(profile.google_id),
            is_admin: false,
        };
        let created = self.users.insert(record).await?;
        Ok(created.into())
    }

    /// Mint an encrypted session token for a user
    pub fn issue_token(&self, user: &UserView) -> Result<String, ApiError> {
        self.vault.encrypt_token(&TokenClaims {
            user_id: user.id.clone(),
            fullname: user.fullname.clone(),
            is_admin: user.is_admin,
        })
    }

    /// Validate a session token; `None` means unauthenticated
    pub fn validate_token(&self, token: &str) -> Option<TokenClaims> {
        self.vault.decrypt_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::MemoryUserDirectory;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn service() -> (AuthSessionService, Arc<MemoryUserDirectory>) {
        let users = Arc::new(MemoryUserDirectory::new());
        let vault = Arc::new(CredentialVault::new("test-secret"));
        (AuthSessionService::new(vault, users.clone()), users)
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (service, users) = service();
        let created = service
            .signup("ada@example.com", "s3cret", "Ada Lovelace", "")
            .await
            .unwrap();
        assert_eq!(created.email, "ada@example.com");

        let logged_in = service.login("ada@example.com", "s3cret").await.unwrap();
        assert_eq!(logged_in.id, created.id);

        // The stored hash is neither the plaintext nor exposed by the view.
        let record = users.get_by_email("ada@example.com").await.unwrap().unwrap();
        let hash = record.password_hash.unwrap();
        assert_ne!(hash, "s3cret");
        let json = serde_json::to_string(&logged_in).unwrap();
        assert!(!json.contains(&hash));
    }

    #[tokio::test]
    async fn test_signup_missing_details() {
        let (service, _) = service();
        let err = service.signup("", "pw", "Name", "").await.unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
        let err = service
            .signup("a@example.com", "", "Name", "")
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
        let err = service
            .signup("a@example.com", "pw", "", "")
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_conflicts() {
        let (service, _) = service();
        service
            .signup("ada@example.com", "pw1", "Ada", "")
            .await
            .unwrap();
        let err = service
            .signup("ada@example.com", "pw2", "Impostor", "")
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::Conflict(ref msg) if msg == "Email taken");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service
            .signup("ada@example.com", "s3cret", "Ada", "")
            .await
            .unwrap();

        let unknown_email = service
            .login("nobody@example.com", "s3cret")
            .await
            .unwrap_err();
        let wrong_password = service
            .login("ada@example.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
        assert_matches!(unknown_email, ApiError::Auth(_));
        assert_matches!(wrong_password, ApiError::Auth(_));
    }

    #[tokio::test]
    async fn test_google_login_creates_then_reuses_account() {
        let (service, users) = service();
        let profile = GoogleProfile {
            email: "ada@example.com".to_string(),
            fullname: "Ada Lovelace".to_string(),
            google_id: "g-12345".to_string(),
            img_url: "https://img.example/a.png".to_string(),
        };

        let first = service.login_with_google(profile.clone()).await.unwrap();
        let record = users.get_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(record.auth_provider, AuthProvider::Google);
        assert!(record.password_hash.is_none());

        let second = service.login_with_google(profile).await.unwrap();
        assert_eq!(second.id, first.id);
    }

    #[tokio::test]
    async fn test_google_login_adopts_existing_local_account() {
        let (service, users) = service();
        service
            .signup("ada@example.com", "s3cret", "Ada", "")
            .await
            .unwrap();

        let profile = GoogleProfile {
            email: "ada@example.com".to_string(),
            fullname: "Ada via Google".to_string(),
            google_id: "g-12345".to_string(),
            img_url: String::new(),
        };
        let adopted = service.login_with_google(profile).await.unwrap();
        assert_eq!(adopted.fullname, "Ada"); // existing record, untouched

        let record = users.get_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(record.auth_provider, AuthProvider::Local);
        assert!(record.google_id.is_none());
    }

    #[tokio::test]
    async fn test_google_login_missing_details() {
        let (service, _) = service();
        let err = service
            .login_with_google(GoogleProfile {
                email: "a@example.com".to_string(),
                fullname: String::new(),
                google_id: String::new(),
                img_url: String::new(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
    }

    #[tokio::test]
    async fn test_issue_and_validate_token() {
        let (service, _) = service();
        let user = service
            .signup("ada@example.com", "s3cret", "Ada", "")
            .await
            .unwrap();

        let token = service.issue_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.fullname, "Ada");
        assert!(!claims.is_admin);

        assert!(service.validate_token("garbage").is_none());
    }
}
