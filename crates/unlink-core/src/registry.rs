use crate::record::{CreateParams, DeleteParams, Shortcut, StatisticsView, UpdateParams};
use async_trait::async_trait;
use std::net::IpAddr;

type Result<T> = std::result::Result<T, crate::error::RegistryError>;

/// Outcome of a create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new record was inserted with an empty visit log.
    Created,
    /// The shortcut is already taken; the incumbent record is untouched.
    AlreadyExists,
}

/// Outcome of an update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    WrongOwner,
}

/// Outcome of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    WrongOwner,
}

/// Outcome of a visit-log append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogVisitOutcome {
    Logged,
    NotFound,
}

/// Outcome of an owner-gated statistics read.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticsOutcome {
    Found(StatisticsView),
    NotFound,
    WrongOwner,
}

/// The shortcut registry: create/read/update/delete/log operations over
/// shortcut records, enforcing the existence and ownership invariants.
///
/// Every operation either fully applies or has no effect. Store
/// connectivity failures surface as `Err`, outside the outcome taxonomy.
#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Inserts a new shortcut record, failing when the shortcut is taken.
    async fn create(&self, params: CreateParams) -> Result<CreateOutcome>;

    /// Returns the full statistics view for an existing record.
    ///
    /// Read-only: resolution never counts as a visit. Logging is a
    /// separate, explicit step so callers can decide whether a lookup is
    /// a redirect or an administrative read.
    async fn resolve(&self, shortcut: &Shortcut) -> Result<Option<StatisticsView>>;

    /// Appends one `(ip, now)` entry to the record's visit log.
    /// No ownership check; any redirect may be logged.
    async fn log_visit(&self, shortcut: &Shortcut, visitor_ip: IpAddr) -> Result<LogVisitOutcome>;

    /// Replaces the target URL of an owned record.
    async fn update(&self, params: UpdateParams) -> Result<UpdateOutcome>;

    /// Removes an owned record and its visit history irrevocably.
    async fn delete(&self, params: DeleteParams) -> Result<DeleteOutcome>;

    /// Cheap existence probe, no ownership gating.
    async fn exists(&self, shortcut: &Shortcut) -> Result<bool>;

    /// Owner-gated read of the statistics view.
    async fn statistics(&self, shortcut: &Shortcut, owner: &str) -> Result<StatisticsOutcome>;
}
