//! Common test utilities
//!
//! Builds the full router over the in-memory user directory, board
//! collection, and a stub media host, so the whole HTTP surface is
//! exercisable without MongoDB or Cloudinary.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum_test::TestServer;
use tokio::sync::RwLock;

use marshmello::auth::{AuthSessionService, CredentialVault};
use marshmello::board::memory::MemoryBoardCollection;
use marshmello::board::BoardStore;
use marshmello::error::ApiError;
use marshmello::routes::create_router;
use marshmello::server::config::{AppConfig, CookieConfig, MediaConfig};
use marshmello::server::state::AppState;
use marshmello::upload::{MediaAsset, MediaHost, UploadOptions, UploadSignature};
use marshmello::user::MemoryUserDirectory;

pub const TEST_SECRET: &str = "test-secret";

/// Media host double: fabricates assets and records deletions
#[derive(Default)]
pub struct StubMediaHost {
    pub deleted: RwLock<Vec<String>>,
}

#[async_trait]
impl MediaHost for StubMediaHost {
    async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        _content_type: &str,
        options: &UploadOptions,
    ) -> Result<MediaAsset, ApiError> {
        Ok(MediaAsset {
            url: format!("https://media.test/{}/{}", options.folder, filename),
            public_id: format!("{}/{}", options.folder, filename),
            format: None,
            resource_type: options.resource_type.clone(),
            bytes: data.len() as u64,
            width: None,
            height: None,
            duration: None,
        })
    }

    async fn delete(&self, public_id: &str, _resource_type: &str) -> Result<(), ApiError> {
        if public_id == "missing" {
            return Err(ApiError::not_found("File not found: missing"));
        }
        self.deleted.write().await.push(public_id.to_string());
        Ok(())
    }

    async fn delete_many(
        &self,
        public_ids: &[String],
        _resource_type: &str,
    ) -> Result<(), ApiError> {
        self.deleted.write().await.extend_from_slice(public_ids);
        Ok(())
    }

    fn upload_signature(&self, folder: &str, resource_type: &str) -> UploadSignature {
        UploadSignature {
            signature: "deadbeef".to_string(),
            timestamp: 1_700_000_000,
            folder: folder.to_string(),
            resource_type: resource_type.to_string(),
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        db_url: String::new(),
        db_name: "marshmelloTestDB".to_string(),
        token_secret: TEST_SECRET.to_string(),
        cookie: CookieConfig {
            name: "loginToken".to_string(),
            http_only: true,
            secure: false,
            same_site: "Lax".to_string(),
            max_age_days: 7,
        },
        media: MediaConfig {
            cloud_name: "test".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            folder: "uploads".to_string(),
        },
        cors_origins: vec!["http://localhost:5173".to_string()],
        public_dir: "public".to_string(),
    }
}

/// The app under test, with handles on its in-memory backends
pub struct TestApp {
    pub server: TestServer,
    pub boards: Arc<MemoryBoardCollection>,
    pub media: Arc<StubMediaHost>,
}

pub fn spawn_app() -> TestApp {
    let boards = Arc::new(MemoryBoardCollection::new());
    let media = Arc::new(StubMediaHost::default());

    let vault = Arc::new(CredentialVault::new(TEST_SECRET));
    let users = Arc::new(MemoryUserDirectory::new());
    let auth = Arc::new(AuthSessionService::new(vault, users));

    let state = AppState {
        config: Arc::new(test_config()),
        auth,
        boards: Arc::new(BoardStore::new(boards.clone())),
        media: media.clone(),
    };

    let server = TestServer::builder()
        .save_cookies()
        .build(create_router(state))
        .expect("failed to build test server");

    TestApp {
        server,
        boards,
        media,
    }
}

/// Sign up a fresh user; the session cookie sticks to the server
pub async fn signup(server: &TestServer, email: &str, password: &str) {
    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "email": email,
            "password": password,
            "fullname": "Test User"
        }))
        .await;
    assert_eq!(response.status_code(), axum::http::StatusCode::OK);
}
