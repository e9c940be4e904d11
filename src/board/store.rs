/**
 * Board Store
 *
 * CRUD over board documents, owning the addressing and update
 * invariants. Identifier resolution goes through [`BoardId::parse`], so
 * a single lookup serves both short ids and legacy ObjectIds.
 *
 * Concurrency: each operation is an independent read-then-write against
 * the shared collection with no application-level locking. The
 * existence-check-then-replace in `update` is not atomic as a whole;
 * two concurrent updates to the same board interleave last-writer-wins.
 * If the replace matches nothing after the check succeeded, the lost
 * race is reported as a conflict rather than retried.
 */

use std::sync::Arc;

use crate::board::collection::{BoardCollection, BoardFilter};
use crate::board::model::{Board, BoardDraft, BoardRecord};
use crate::error::ApiError;
use crate::ident::{self, BoardId, SHORT_ID_LEN};

pub struct BoardStore {
    collection: Arc<dyn BoardCollection>,
}

impl BoardStore {
    pub fn new(collection: Arc<dyn BoardCollection>) -> Self {
        Self { collection }
    }

    /// Create a board from a draft
    ///
    /// Assigns a fresh short id (independent of content) and fills every
    /// optional field with its documented default. The returned board
    /// carries the short id as its public id.
    pub async fn create(&self, draft: BoardDraft) -> Result<Board, ApiError> {
        let record = BoardRecord {
            internal_id: None,
            short_id: Some(ident::generate(SHORT_ID_LEN)),
            title: draft.title,
            is_starred: draft.is_starred,
            archived_at: draft.archived_at,
            created_by: draft.created_by,
            style: draft.style.unwrap_or_default(),
            labels: draft.labels,
            members: draft.members,
            groups: draft.groups,
            activities: draft.activities,
        };
        let stored = self.collection.insert(record).await?;
        Ok(stored.into_board())
    }

    /// Look up a board by either identifier form
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Board, ApiError> {
        let record = self.resolve(raw_id).await?;
        Ok(record.into_board())
    }

    /// List boards, optionally filtered by a case-insensitive title
    /// substring. Ordering is store-native.
    pub async fn list(&self, filter: &BoardFilter) -> Result<Vec<Board>, ApiError> {
        let records = self.collection.find(filter).await?;
        Ok(records.into_iter().map(BoardRecord::into_board).collect())
    }

    /// Full-replace update of an existing board
    ///
    /// Requires `board.id`; resolves exactly as `get_by_id` does and
    /// fails with `NotFound` when nothing matches. All mutable fields
    /// are replaced wholesale; both identifier fields are preserved from
    /// the existing record, so an update can never change a board's id.
    pub async fn update(&self, board: Board) -> Result<Board, ApiError> {
        let id = BoardId::parse(&board.id)?;
        let existing = self
            .collection
            .find_one(&id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("board {} not found", board.id)))?;

        let record = BoardRecord {
            internal_id: existing.internal_id,
            short_id: existing.short_id,
            title: board.title,
            is_starred: board.is_starred,
            archived_at: board.archived_at,
            created_by: board.created_by,
            style: board.style,
            labels: board.labels,
            members: board.members,
            groups: board.groups,
            activities: board.activities,
        };

        let matched = self.collection.replace(&id, &record).await?;
        if matched == 0 {
            // Existence check passed but the replace matched nothing:
            // the record was removed between check and write.
            return Err(ApiError::conflict("board update failed"));
        }
        Ok(record.into_board())
    }

    /// Delete a board by either identifier form
    pub async fn remove(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = BoardId::parse(raw_id)?;
        let deleted = self.collection.delete(&id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found(format!("board {} not found", raw_id)));
        }
        Ok(())
    }

    async fn resolve(&self, raw_id: &str) -> Result<BoardRecord, ApiError> {
        let id = BoardId::parse(raw_id)?;
        self.collection
            .find_one(&id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("board {} not found", raw_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::memory::MemoryBoardCollection;
    use crate::board::model::BoardStyle;
    use crate::ident::ALPHABET;
    use assert_matches::assert_matches;
    use mongodb::bson::oid::ObjectId;
    use pretty_assertions::assert_eq;

    fn store() -> (BoardStore, Arc<MemoryBoardCollection>) {
        let collection = Arc::new(MemoryBoardCollection::new());
        (BoardStore::new(collection.clone()), collection)
    }

    fn draft(title: &str) -> BoardDraft {
        BoardDraft {
            title: title.to_string(),
            ..BoardDraft::default()
        }
    }

    fn legacy_record(title: &str) -> BoardRecord {
        BoardRecord {
            internal_id: None,
            short_id: None,
            title: title.to_string(),
            is_starred: false,
            archived_at: None,
            created_by: None,
            style: BoardStyle::default(),
            labels: vec![],
            members: vec![],
            groups: vec![],
            activities: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_short_id_and_defaults() {
        let (store, _) = store();
        let board = store.create(draft("Sprint 1")).await.unwrap();

        assert_eq!(board.id.len(), 8);
        assert!(board.id.bytes().all(|b| ALPHABET.contains(&b)));
        assert!(!board.is_starred);
        assert_eq!(board.archived_at, None);
        assert!(board.labels.is_empty());
        assert!(board.members.is_empty());
        assert!(board.groups.is_empty());
        assert!(board.activities.is_empty());
        assert_eq!(board.style, BoardStyle::default());
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrip() {
        let (store, _) = store();
        let created = store.create(draft("Sprint 1")).await.unwrap();
        let fetched = store.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (store, _) = store();
        let err = store.get_by_id("nosuchid").await.unwrap_err();
        assert_matches!(err, ApiError::NotFound(_));
    }

    #[tokio::test]
    async fn test_list_title_filter_is_case_insensitive() {
        let (store, _) = store();
        store.create(draft("Sprint 1")).await.unwrap();
        store.create(draft("Backlog")).await.unwrap();

        let filter = BoardFilter {
            title_contains: Some("sprint".to_string()),
        };
        let boards = store.list(&filter).await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].title, "Sprint 1");

        let all = store.list(&BoardFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_preserves_id() {
        let (store, _) = store();
        let mut board = store.create(draft("Sprint 1")).await.unwrap();
        let original_id = board.id.clone();

        board.title = "Sprint 2".to_string();
        board.is_starred = true;
        let updated = store.update(board).await.unwrap();

        assert_eq!(updated.id, original_id);
        assert_eq!(updated.title, "Sprint 2");
        assert!(updated.is_starred);

        let fetched = store.get_by_id(&original_id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_is_full_replace_not_merge() {
        let (store, _) = store();
        let mut board = store.create(draft("Sprint 1")).await.unwrap();
        board.labels = vec![serde_json::json!({"title": "urgent"})];
        let board = store.update(board).await.unwrap();
        assert_eq!(board.labels.len(), 1);

        // Resending without labels drops them.
        let mut replacement = board.clone();
        replacement.labels = vec![];
        let replaced = store.update(replacement).await.unwrap();
        assert!(replaced.labels.is_empty());
    }

    #[tokio::test]
    async fn test_update_nonexistent_is_not_found() {
        let (store, _) = store();
        let board = Board {
            id: "nosuchid".to_string(),
            title: "ghost".to_string(),
            ..store.create(draft("seed")).await.unwrap()
        };
        let err = store.update(board).await.unwrap_err();
        assert_matches!(err, ApiError::NotFound(_));
    }

    #[tokio::test]
    async fn test_update_without_id_is_validation_error() {
        let (store, _) = store();
        let mut board = store.create(draft("Sprint 1")).await.unwrap();
        board.id = String::new();
        let err = store.update(board).await.unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
    }

    #[tokio::test]
    async fn test_remove_then_get_is_not_found() {
        let (store, _) = store();
        let board = store.create(draft("Sprint 1")).await.unwrap();
        store.remove(&board.id).await.unwrap();
        let err = store.get_by_id(&board.id).await.unwrap_err();
        assert_matches!(err, ApiError::NotFound(_));

        let err = store.remove(&board.id).await.unwrap_err();
        assert_matches!(err, ApiError::NotFound(_));
    }

    #[tokio::test]
    async fn test_legacy_board_full_lifecycle_by_internal_id() {
        let (store, collection) = store();
        let oid = collection.seed(legacy_record("Old Board")).await;
        let hex = oid.to_hex();

        // Retrievable: public id stays the legacy hex.
        let board = store.get_by_id(&hex).await.unwrap();
        assert_eq!(board.id, hex);
        assert_eq!(board.title, "Old Board");

        // Updatable, id unchanged, still no short id minted.
        let mut board = board;
        board.title = "Old Board (renamed)".to_string();
        let updated = store.update(board).await.unwrap();
        assert_eq!(updated.id, hex);

        // Deletable.
        store.remove(&hex).await.unwrap();
        assert_matches!(store.get_by_id(&hex).await.unwrap_err(), ApiError::NotFound(_));
    }

    /// Collection double that loses every update race: the existence
    /// check sees the record, then a concurrent delete wins before the
    /// replace lands.
    struct RacingCollection {
        inner: MemoryBoardCollection,
    }

    #[async_trait::async_trait]
    impl BoardCollection for RacingCollection {
        async fn find(&self, filter: &BoardFilter) -> Result<Vec<BoardRecord>, ApiError> {
            self.inner.find(filter).await
        }

        async fn find_one(&self, id: &BoardId) -> Result<Option<BoardRecord>, ApiError> {
            let record = self.inner.find_one(id).await?;
            if record.is_some() {
                self.inner.delete(id).await?;
            }
            Ok(record)
        }

        async fn insert(&self, record: BoardRecord) -> Result<BoardRecord, ApiError> {
            self.inner.insert(record).await
        }

        async fn replace(&self, id: &BoardId, record: &BoardRecord) -> Result<u64, ApiError> {
            self.inner.replace(id, record).await
        }

        async fn delete(&self, id: &BoardId) -> Result<u64, ApiError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_update_lost_race_is_conflict() {
        let collection = Arc::new(RacingCollection {
            inner: MemoryBoardCollection::new(),
        });
        let store = BoardStore::new(collection);
        let mut board = store.create(draft("Racy")).await.unwrap();

        // The existence check passes, then the record vanishes before
        // the replace: the lost race surfaces as Conflict, not NotFound.
        board.title = "Racy, renamed".to_string();
        let err = store.update(board).await.unwrap_err();
        assert_matches!(err, ApiError::Conflict(ref msg) if msg == "board update failed");
    }
}
