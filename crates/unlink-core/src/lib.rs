//! Core types and traits for the unlink URL-shortening registry.
//!
//! This crate provides the record model, the repository abstraction over
//! the persistent store, and the registry operation contract shared by
//! the service and transport crates.

pub mod error;
pub mod record;
pub mod registry;
pub mod repository;

pub use error::{CoreError, RegistryError, StorageError};
pub use record::{
    CreateParams, DeleteParams, Shortcut, ShortcutRecord, StatisticsView, UpdateParams, Visit,
};
pub use registry::{
    CreateOutcome, DeleteOutcome, LogVisitOutcome, Registry, StatisticsOutcome, UpdateOutcome,
};
pub use repository::{ReadRepository, Repository};
