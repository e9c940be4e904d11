/**
 * Board Handlers
 *
 * HTTP surface under /api/board. All routes sit behind the auth
 * middleware. On PUT, the path id is authoritative and overrides any id
 * in the body, matching the original controller.
 */

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::board::collection::BoardFilter;
use crate::board::model::{Board, BoardDraft};
use crate::board::store::BoardStore;
use crate::error::ApiError;

/// Query parameters for GET /api/board
#[derive(Debug, Default, Deserialize)]
pub struct BoardListParams {
    /// Case-insensitive title substring
    pub title: Option<String>,
}

pub async fn get_boards(
    State(store): State<Arc<BoardStore>>,
    Query(params): Query<BoardListParams>,
) -> Result<Json<Vec<Board>>, ApiError> {
    let filter = BoardFilter {
        title_contains: params.title,
    };
    let boards = store.list(&filter).await?;
    Ok(Json(boards))
}

pub async fn get_board(
    State(store): State<Arc<BoardStore>>,
    Path(id): Path<String>,
) -> Result<Json<Board>, ApiError> {
    let board = store.get_by_id(&id).await?;
    Ok(Json(board))
}

pub async fn add_board(
    State(store): State<Arc<BoardStore>>,
    Json(draft): Json<BoardDraft>,
) -> Result<Json<Board>, ApiError> {
    let board = store.create(draft).await?;
    tracing::debug!("board created: {}", board.id);
    Ok(Json(board))
}

pub async fn update_board(
    State(store): State<Arc<BoardStore>>,
    Path(id): Path<String>,
    Json(mut board): Json<Board>,
) -> Result<Json<Board>, ApiError> {
    board.id = id;
    let saved = store.update(board).await?;
    Ok(Json(saved))
}

pub async fn delete_board(
    State(store): State<Arc<BoardStore>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    store.remove(&id).await?;
    tracing::debug!("board deleted: {}", id);
    Ok(Json(json!({ "msg": "Deleted successfully" })))
}
