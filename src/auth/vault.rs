/**
 * Credential Vault
 *
 * Wraps the two credential primitives the auth layer needs:
 *
 * - bcrypt password hashing and verification
 * - AES-256-GCM encryption of opaque session tokens
 *
 * Session tokens are an encrypted JSON payload of minimal identity
 * claims, base64url-encoded for cookie transport. Decryption failures of
 * any kind (corrupt token, wrong key, malformed JSON) collapse into
 * `None` so callers treat "no valid session" as a normal state.
 */

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// bcrypt cost factor
const BCRYPT_COST: u32 = 10;

/// Size of the AES-GCM nonce in bytes
const NONCE_SIZE: usize = 12;

/// Identity claims carried by a session token
///
/// Minted at login/signup, transported in the `loginToken` cookie. There
/// is no server-side revocation; a token stays valid until the cookie
/// expires client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: String,
    pub fullname: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Password hashing and session token encryption
pub struct CredentialVault {
    cipher: Aes256Gcm,
}

impl CredentialVault {
    /// Build a vault from the process-wide token secret
    ///
    /// The AES key is the SHA-256 digest of the configured secret string.
    pub fn new(secret: &str) -> Self {
        let key_bytes = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Hash a plaintext password
    ///
    /// One-way, salted per call by bcrypt.
    pub fn hash_password(&self, plaintext: &str) -> Result<String, ApiError> {
        bcrypt::hash(plaintext, BCRYPT_COST)
            .map_err(|e| ApiError::upstream(format!("password hashing failed: {}", e)))
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// Returns false on mismatch or on a malformed hash, never an error.
    pub fn verify_password(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    /// Encrypt identity claims into an opaque cookie-safe token
    ///
    /// Output is base64url(nonce || ciphertext) with a fresh random nonce
    /// per token.
    pub fn encrypt_token(&self, claims: &TokenClaims) -> Result<String, ApiError> {
        let plaintext = serde_json::to_vec(claims)?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_slice())
            .map_err(|e| ApiError::upstream(format!("token encryption failed: {}", e)))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(out))
    }

    /// Decrypt and deserialize a session token
    ///
    /// Returns `None` on any failure; callers treat that as
    /// unauthenticated rather than an error.
    pub fn decrypt_token(&self, token: &str) -> Option<TokenClaims> {
        let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
        if bytes.len() <= NONCE_SIZE {
            tracing::warn!("invalid login token");
            return None;
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = match self.cipher.decrypt(nonce, ciphertext) {
            Ok(plaintext) => plaintext,
            Err(_) => {
                tracing::warn!("invalid login token");
                return None;
            }
        };

        match serde_json::from_slice(&plaintext) {
            Ok(claims) => Some(claims),
            Err(_) => {
                tracing::warn!("invalid login token");
                None
            }
        }
    }
}
