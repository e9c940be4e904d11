/**
 * Router Configuration
 *
 * Combines the API routes, the CORS layer, and the static SPA fallback
 * into the final Axum router.
 *
 * # Route Order
 *
 * 1. API routes (auth public, board/upload behind the auth middleware)
 * 2. Static files from the public directory
 * 3. index.html fallback, so client-side routes deep-link correctly
 *
 * # CORS
 *
 * Cookie auth requires credentialed CORS, and tower-http refuses
 * wildcards with credentials on, so origins, methods, and headers are
 * all listed explicitly.
 */

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::routes::api_routes::configure_api_routes;
use crate::server::config::AppConfig;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router<()> {
    let router = configure_api_routes(&state);

    let router = router.layer(cors_layer(&state.config));

    // Serve the built SPA; unknown paths fall back to index.html so the
    // client-side router can take over
    let public_dir = state.config.public_dir.clone();
    let index = format!("{public_dir}/index.html");
    let spa = ServeDir::new(&public_dir).fallback(ServeFile::new(index));
    let router = router.fallback_service(spa);

    router.with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring malformed CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
