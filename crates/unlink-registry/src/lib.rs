//! Shortcut registry service implementation.
//!
//! This crate provides the stateful engine behind the `Registry` trait:
//! existence and ownership gating over an injected repository. Core
//! types are re-exported from `unlink_core`.

pub mod service;

pub use service::RegistryService;
pub use unlink_core::{Registry, RegistryError};
