//! Marshmello - Kanban Board Backend
//!
//! Backend for the Marshmello kanban board application: cookie-based
//! authentication (local credentials and Google sign-in), board CRUD
//! over MongoDB, and media uploads proxied to Cloudinary.
//!
//! # Module Structure
//!
//! - **`auth`** - credential vault (bcrypt + AES-GCM tokens), session
//!   service, and the /api/auth handlers
//! - **`board`** - board model, store, Mongo/in-memory collections, and
//!   the /api/board handlers
//! - **`upload`** - media host boundary, Cloudinary client, and the
//!   /api/upload handlers
//! - **`user`** - user records and the directory boundary
//! - **`ident`** - short base62 board identifiers and dual-format
//!   id parsing
//! - **`middleware`** - cookie-based auth middleware and extractor
//! - **`routes`** / **`server`** - router assembly, configuration, and
//!   startup wiring
//! - **`error`** - the API error taxonomy and its HTTP mapping
//!
//! # Usage
//!
//! ```rust,no_run
//! use marshmello::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()).await?;
//! // Serve `app` with Axum
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod board;
pub mod error;
pub mod ident;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod upload;
pub mod user;
