/**
 * Application State
 *
 * Central state container for the Axum application, built once at
 * startup and cloned into every handler. `FromRef` implementations let
 * handlers extract just the component they need.
 *
 * The integration tests build the same `AppState` over the in-memory
 * directory/collection/media-host implementations, so the whole router
 * is exercisable without MongoDB or Cloudinary.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthSessionService;
use crate::board::BoardStore;
use crate::server::config::AppConfig;
use crate::upload::MediaHost;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthSessionService>,
    pub boards: Arc<BoardStore>,
    pub media: Arc<dyn MediaHost>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<AuthSessionService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<BoardStore> {
    fn from_ref(state: &AppState) -> Self {
        state.boards.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MediaHost> {
    fn from_ref(state: &AppState) -> Self {
        state.media.clone()
    }
}
