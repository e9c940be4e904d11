/**
 * Board Module
 *
 * Board documents, the collection boundary over the document store, and
 * the store that owns the addressing and update invariants:
 *
 * - every new board gets exactly one store-assigned short id, immutable
 *   for the lifetime of the record
 * - legacy boards (pre short-id) stay addressable by their ObjectId
 * - update requires an existing match and replaces mutable fields
 *   wholesale; it never upserts
 */

pub mod collection;
pub mod handlers;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod store;

pub use collection::{BoardCollection, BoardFilter};
pub use memory::MemoryBoardCollection;
pub use model::{Board, BoardDraft, BoardRecord, BoardStyle};
pub use mongo::MongoBoardCollection;
pub use store::BoardStore;
