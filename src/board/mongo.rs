/**
 * MongoDB Board Collection
 *
 * Production implementation of [`BoardCollection`] over the `board`
 * collection. Short ids match on the `shortId` field, legacy ids on
 * `_id`; the title filter becomes a case-insensitive regex with the
 * input escaped so it behaves as a plain substring match.
 */

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document, Regex};
use mongodb::{Collection, Database};

use crate::board::collection::{BoardCollection, BoardFilter};
use crate::board::model::BoardRecord;
use crate::error::ApiError;
use crate::ident::BoardId;

/// Name of the backing collection
pub const COLLECTION: &str = "board";

pub struct MongoBoardCollection {
    collection: Collection<BoardRecord>,
}

impl MongoBoardCollection {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    fn selector(id: &BoardId) -> Document {
        match id {
            BoardId::Short(short) => doc! { "shortId": short },
            BoardId::Legacy(oid) => doc! { "_id": oid },
        }
    }

    fn criteria(filter: &BoardFilter) -> Document {
        match &filter.title_contains {
            Some(needle) if !needle.is_empty() => doc! {
                "title": Regex {
                    pattern: escape_regex(needle),
                    options: "i".to_string(),
                }
            },
            _ => doc! {},
        }
    }
}

/// Escape regex metacharacters so user input matches literally
fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl BoardCollection for MongoBoardCollection {
    async fn find(&self, filter: &BoardFilter) -> Result<Vec<BoardRecord>, ApiError> {
        let cursor = self.collection.find(Self::criteria(filter)).await?;
        let boards = cursor.try_collect().await?;
        Ok(boards)
    }

    async fn find_one(&self, id: &BoardId) -> Result<Option<BoardRecord>, ApiError> {
        let record = self.collection.find_one(Self::selector(id)).await?;
        Ok(record)
    }

    async fn insert(&self, mut record: BoardRecord) -> Result<BoardRecord, ApiError> {
        let result = self.collection.insert_one(&record).await?;
        record.internal_id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn replace(&self, id: &BoardId, record: &BoardRecord) -> Result<u64, ApiError> {
        let result = self.collection.replace_one(Self::selector(id), record).await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: &BoardId) -> Result<u64, ApiError> {
        let result = self.collection.delete_one(Self::selector(id)).await?;
        Ok(result.deleted_count)
    }
}
