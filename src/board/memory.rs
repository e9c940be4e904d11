/**
 * In-Memory Board Collection
 *
 * [`BoardCollection`] over an `Arc<RwLock<Vec<_>>>`, used by the test
 * suites in place of a running MongoDB instance. Matching mirrors the
 * Mongo implementation: short ids on `shortId`, legacy ids on `_id`,
 * case-insensitive substring on title.
 */

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::board::collection::{BoardCollection, BoardFilter};
use crate::board::model::BoardRecord;
use crate::error::ApiError;
use crate::ident::BoardId;

#[derive(Default, Clone)]
pub struct MemoryBoardCollection {
    boards: Arc<RwLock<Vec<BoardRecord>>>,
}

impl MemoryBoardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the store. Lets tests create
    /// legacy documents that have no short id.
    pub async fn seed(&self, mut record: BoardRecord) -> ObjectId {
        let id = record.internal_id.unwrap_or_else(ObjectId::new);
        record.internal_id = Some(id);
        self.boards.write().await.push(record);
        id
    }

    fn matches(record: &BoardRecord, id: &BoardId) -> bool {
        match id {
            BoardId::Short(short) => record.short_id.as_deref() == Some(short.as_str()),
            BoardId::Legacy(oid) => record.internal_id.as_ref() == Some(oid),
        }
    }
}

#[async_trait]
impl BoardCollection for MemoryBoardCollection {
    async fn find(&self, filter: &BoardFilter) -> Result<Vec<BoardRecord>, ApiError> {
        let boards = self.boards.read().await;
        let records = match &filter.title_contains {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                boards
                    .iter()
                    .filter(|b| b.title.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            _ => boards.clone(),
        };
        Ok(records)
    }

    async fn find_one(&self, id: &BoardId) -> Result<Option<BoardRecord>, ApiError> {
        let boards = self.boards.read().await;
        Ok(boards.iter().find(|b| Self::matches(b, id)).cloned())
    }

    async fn insert(&self, mut record: BoardRecord) -> Result<BoardRecord, ApiError> {
        record.internal_id = Some(ObjectId::new());
        self.boards.write().await.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, id: &BoardId, record: &BoardRecord) -> Result<u64, ApiError> {
        let mut boards = self.boards.write().await;
        match boards.iter_mut().find(|b| Self::matches(b, id)) {
            Some(slot) => {
                *slot = record.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &BoardId) -> Result<u64, ApiError> {
        let mut boards = self.boards.write().await;
        let before = boards.len();
        boards.retain(|b| !Self::matches(b, id));
        Ok((before - boards.len()) as u64)
    }
}
