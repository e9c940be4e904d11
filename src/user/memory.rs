/**
 * In-Memory User Directory
 *
 * [`UserDirectory`] implementation backed by an `Arc<RwLock<Vec<_>>>`.
 * Used by the test suites in place of a running MongoDB instance.
 */

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::user::{UserDirectory, UserRecord};

#[derive(Default, Clone)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<Vec<UserRecord>>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, ApiError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<UserRecord>, ApiError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn insert(&self, mut user: UserRecord) -> Result<UserRecord, ApiError> {
        user.id = Some(ObjectId::new());
        let mut users = self.users.write().await;
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::AuthProvider;

    fn user(email: &str) -> UserRecord {
        UserRecord {
            id: None,
            email: email.to_string(),
            password_hash: Some("hash".to_string()),
            fullname: "Someone".to_string(),
            img_url: String::new(),
            auth_provider: AuthProvider::Local,
            google_id: None,
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let dir = MemoryUserDirectory::new();
        let inserted = dir.insert(user("a@example.com")).await.unwrap();
        assert!(inserted.id.is_some());
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_id() {
        let dir = MemoryUserDirectory::new();
        let inserted = dir.insert(user("a@example.com")).await.unwrap();

        let by_email = dir.get_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.email, "a@example.com");

        let id = inserted.id.unwrap();
        let by_id = dir.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(by_id.id, Some(id));

        assert!(dir.get_by_email("missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let dir = MemoryUserDirectory::new();
        dir.insert(user("Ada@example.com")).await.unwrap();
        assert!(dir.get_by_email("ada@example.com").await.unwrap().is_none());
    }
}
