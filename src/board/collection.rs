/**
 * Board Collection Boundary
 *
 * The document store is an external collaborator; this trait is the
 * whole interface the board layer relies on: find with an optional
 * case-insensitive title filter, find/replace/delete by a classified
 * identifier, and insert. The MongoDB implementation lives in
 * `board::mongo`, the test double in `board::memory`.
 */

use async_trait::async_trait;

use crate::board::model::BoardRecord;
use crate::error::ApiError;
use crate::ident::BoardId;

/// Listing filter
///
/// `title_contains` is a case-insensitive substring match. An empty
/// filter returns the whole collection in store-native order.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    pub title_contains: Option<String>,
}

/// Collection-scoped operations over board documents
///
/// `replace` and `delete` report matched/deleted counts; the store turns
/// a zero count into the appropriate domain error.
#[async_trait]
pub trait BoardCollection: Send + Sync {
    async fn find(&self, filter: &BoardFilter) -> Result<Vec<BoardRecord>, ApiError>;

    async fn find_one(&self, id: &BoardId) -> Result<Option<BoardRecord>, ApiError>;

    /// Insert a record, returning it with its store-assigned `_id`
    async fn insert(&self, record: BoardRecord) -> Result<BoardRecord, ApiError>;

    /// Replace the document matching `id`, returning the matched count
    async fn replace(&self, id: &BoardId, record: &BoardRecord) -> Result<u64, ApiError>;

    /// Delete the document matching `id`, returning the deleted count
    async fn delete(&self, id: &BoardId) -> Result<u64, ApiError>;
}
