/**
 * API Route Handlers
 *
 * Wires handlers to paths under /api.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/signup` - local registration
 * - `POST /api/auth/login` - local login
 * - `POST /api/auth/google` - Google sign-in
 * - `POST /api/auth/logout` - clear the session cookie
 *
 * ## Boards (require the `loginToken` cookie)
 * - `GET /api/board` - list, optional ?title= filter
 * - `POST /api/board` - create
 * - `GET /api/board/{id}` - fetch by short or legacy id
 * - `PUT /api/board/{id}` - full replace
 * - `DELETE /api/board/{id}` - remove
 *
 * ## Uploads (require the `loginToken` cookie)
 * - `POST /api/upload` - single file
 * - `POST /api/upload/multiple` - several files
 * - `GET /api/upload/signature` - signed client-side upload params
 * - `DELETE /api/upload/{public_id}` - remove one asset
 * - `DELETE /api/upload` - remove a batch
 */

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::auth::handlers::{login, login_with_google, logout, signup};
use crate::board::handlers::{add_board, delete_board, get_board, get_boards, update_board};
use crate::middleware::require_auth;
use crate::server::state::AppState;
use crate::upload::handlers::{
    delete_file, delete_files, get_upload_signature, upload_file, upload_multiple,
};
use crate::upload::MAX_FILE_BYTES;

/// Build the /api router: public auth routes plus cookie-protected
/// board and upload routes
pub fn configure_api_routes(state: &AppState) -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/google", post(login_with_google))
        .route("/api/auth/logout", post(logout));

    let board_routes = Router::new()
        .route("/api/board", get(get_boards).post(add_board))
        .route(
            "/api/board/{id}",
            get(get_board).put(update_board).delete(delete_board),
        );

    let upload_routes = Router::new()
        .route("/api/upload", post(upload_file).delete(delete_files))
        .route("/api/upload/multiple", post(upload_multiple))
        .route("/api/upload/signature", get(get_upload_signature))
        .route("/api/upload/{public_id}", delete(delete_file))
        // Body cap leaves room for multi-file requests; the per-file
        // 50MB limit is enforced in the handlers
        .layer(DefaultBodyLimit::max(MAX_FILE_BYTES * 10));

    let protected = board_routes.merge(upload_routes).route_layer(
        axum::middleware::from_fn_with_state(state.clone(), require_auth),
    );

    auth_routes.merge(protected)
}
