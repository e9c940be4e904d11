/**
 * MongoDB User Directory
 *
 * Production implementation of [`UserDirectory`] over the `user`
 * collection.
 */

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::error::ApiError;
use crate::user::{UserDirectory, UserRecord};

/// Name of the backing collection
pub const COLLECTION: &str = "user";

pub struct MongoUserDirectory {
    collection: Collection<UserRecord>,
}

impl MongoUserDirectory {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, ApiError> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<UserRecord>, ApiError> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    async fn insert(&self, mut user: UserRecord) -> Result<UserRecord, ApiError> {
        let result = self.collection.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }
}
