/**
 * User Directory
 *
 * User records and the directory boundary the auth layer talks to.
 * The directory is a trait so the production MongoDB collection and the
 * in-memory test directory expose the same surface: lookup by email or
 * id, and insert. Users are never deleted in scope.
 */

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub mod memory;
pub mod mongo;

pub use memory::MemoryUserDirectory;
pub use mongo::MongoUserDirectory;

/// How an account authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Google,
}

/// A user document as stored in the `user` collection
///
/// `password_hash` is `None` for federated accounts. It must never reach
/// a client-facing response or a log line; hand out [`UserView`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub password_hash: Option<String>,
    pub fullname: String,
    #[serde(default)]
    pub img_url: String,
    pub auth_provider: AuthProvider,
    #[serde(default)]
    pub google_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Client-facing user shape, with the password hash stripped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub fullname: String,
    pub img_url: String,
    pub is_admin: bool,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: record.email,
            fullname: record.fullname,
            img_url: record.img_url,
            is_admin: record.is_admin,
        }
    }
}

/// Lookup/insert boundary over the user collection
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by email (case-sensitive, as stored)
    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, ApiError>;

    /// Find a user by database id
    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<UserRecord>, ApiError>;

    /// Insert a new user, returning it with its store-assigned id
    async fn insert(&self, user: UserRecord) -> Result<UserRecord, ApiError>;
}
