//! REST API for Kuzkabuh leads.
//!
//! This crate serves two audiences:
//! - the order bot, which posts confirmed orders to `/api/add_order`
//! - the administrator, who lists, edits and deletes stored leads
//!
//! Everything except `/api/health` sits behind HTTP basic auth with the single
//! admin credential.
//!
//! # Example
//!
//! ```ignore
//! use kuzka_api::{ApiConfig, AppState, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("127.0.0.1", 59000, "admin", "secret");
//!     let state = AppState::new(config.clone());
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::{AdminCredentials, ApiConfig};
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
