use crate::error::CoreError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::net::IpAddr;

const MAX_LENGTH: usize = 64;

/// A validated shortcut identifier.
///
/// Shortcuts are case-sensitive, 1-64 characters long, and contain only
/// alphanumeric characters, hyphens, or underscores. The identifier is
/// immutable once a record is created; update never renames.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shortcut(String);

impl Shortcut {
    /// Creates a new `Shortcut` after validating the input.
    pub fn new(shortcut: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let shortcut = shortcut.into();
        Self::validate(&shortcut)?;
        Ok(Self(shortcut))
    }

    /// Creates a `Shortcut` without validation.
    ///
    /// Use this only for values produced by trusted internal sources.
    pub fn new_unchecked(shortcut: impl Into<String>) -> Self {
        Self(shortcut.into())
    }

    /// Returns the shortcut as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(shortcut: &str) -> std::result::Result<(), CoreError> {
        if shortcut.is_empty() || shortcut.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortcut(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                shortcut.len()
            )));
        }

        if !shortcut
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidShortcut(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                shortcut
            )));
        }

        Ok(())
    }
}

impl Display for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single logged redirect: the visitor's IP and when it was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub ip: IpAddr,
    pub at: Timestamp,
}

impl Visit {
    /// Creates a visit entry stamped with the current time.
    pub fn now(ip: IpAddr) -> Self {
        Self {
            ip,
            at: Timestamp::now(),
        }
    }
}

/// The persisted shortcut record, the sole stored entity.
///
/// `owner` is an opaque credential set at creation; it is never exposed
/// beyond equality comparison and no operation changes it. `visitors` is
/// append-only; entries are in the chronological order redirects were
/// served and are discarded only with the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutRecord {
    pub shortcut: Shortcut,
    pub target_url: String,
    pub owner: String,
    pub visitors: Vec<Visit>,
}

impl ShortcutRecord {
    /// Creates a fresh record with an empty visit log.
    pub fn new(
        shortcut: Shortcut,
        target_url: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            shortcut,
            target_url: target_url.into(),
            owner: owner.into(),
            visitors: Vec::new(),
        }
    }
}

/// Read model returned by resolution and statistics queries.
///
/// Never accepted as input to any operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsView {
    pub shortcut: Shortcut,
    pub target_url: String,
    pub owner: String,
    pub visitors: Vec<Visit>,
}

impl From<ShortcutRecord> for StatisticsView {
    fn from(record: ShortcutRecord) -> Self {
        Self {
            shortcut: record.shortcut,
            target_url: record.target_url,
            owner: record.owner,
            visitors: record.visitors,
        }
    }
}

/// Parameters for creating a shortcut record.
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub shortcut: Shortcut,
    pub target_url: String,
    pub owner: String,
}

/// Parameters for replacing an existing record's target URL.
#[derive(Debug, Clone)]
pub struct UpdateParams {
    pub shortcut: Shortcut,
    pub target_url: String,
    pub owner: String,
}

/// Parameters for deleting a record and its visit history.
#[derive(Debug, Clone)]
pub struct DeleteParams {
    pub shortcut: Shortcut,
    pub owner: String,
}
