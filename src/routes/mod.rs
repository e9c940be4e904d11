//! Route Configuration Module
//!
//! Configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! - **`router`** - Main router assembly: API routes, CORS, SPA fallback
//! - **`api_routes`** - API endpoints (auth, board, upload)
//!
//! # Route Organization
//!
//! 1. **Auth Routes** (public) - signup, login, Google login, logout
//! 2. **Board Routes** (protected) - CRUD over boards
//! 3. **Upload Routes** (protected) - media upload/delete pass-through
//! 4. **Static Fallback** - the built SPA, with index.html for client
//!    side routing

pub mod api_routes;
pub mod router;

pub use router::create_router;
