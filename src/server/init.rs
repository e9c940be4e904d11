/**
 * Server Initialization
 *
 * Builds the application from configuration: connects to MongoDB,
 * constructs the auth service, board store, and media host, and wires
 * them into the router.
 *
 * # Initialization Process
 *
 * 1. Connect to MongoDB and ping it - startup fails fast when the
 *    database is unreachable, there is no degraded mode
 * 2. Build the credential vault from the token secret
 * 3. Build the Mongo-backed user directory and board collection
 * 4. Build the Cloudinary client
 * 5. Assemble `AppState` and the router
 */

use std::sync::Arc;

use axum::Router;
use mongodb::bson::doc;
use mongodb::Client;

use crate::auth::{AuthSessionService, CredentialVault};
use crate::board::mongo::MongoBoardCollection;
use crate::board::BoardStore;
use crate::error::ApiError;
use crate::routes::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;
use crate::upload::Cloudinary;
use crate::user::mongo::MongoUserDirectory;

/// Connect to MongoDB and verify the connection with a ping
async fn connect_database(config: &AppConfig) -> Result<mongodb::Database, ApiError> {
    if config.db_url.is_empty() {
        return Err(ApiError::upstream(
            "MONGODB_URI is not set; refusing to start without a database",
        ));
    }

    let client = Client::with_uri_str(&config.db_url)
        .await
        .map_err(|e| ApiError::upstream(format!("Cannot connect to MongoDB: {e}")))?;
    let database = client.database(&config.db_name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| ApiError::upstream(format!("MongoDB ping failed: {e}")))?;

    tracing::info!("connected to MongoDB database {}", config.db_name);
    Ok(database)
}

/// Build application state over the production backends
pub async fn build_state(config: AppConfig) -> Result<AppState, ApiError> {
    let database = connect_database(&config).await?;

    let vault = Arc::new(CredentialVault::new(&config.token_secret));
    let users = Arc::new(MongoUserDirectory::new(&database));
    let auth = Arc::new(AuthSessionService::new(vault, users));

    let boards = Arc::new(BoardStore::new(Arc::new(MongoBoardCollection::new(
        &database,
    ))));

    let media = Arc::new(Cloudinary::new(config.media.clone()));

    Ok(AppState {
        config: Arc::new(config),
        auth,
        boards,
        media,
    })
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, ApiError> {
    let state = build_state(config).await?;
    Ok(create_router(state))
}
