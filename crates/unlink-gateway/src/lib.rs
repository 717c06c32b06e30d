//! HTTP transport for the unlink shortcut registry.
//!
//! The gateway decodes requests into typed registry operations, maps
//! the registry's outcomes to HTTP statuses, and performs the redirect
//! itself after a successful resolution. The registry core knows
//! nothing of this status vocabulary.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
