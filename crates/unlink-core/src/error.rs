use thiserror::Error;

/// Errors related to the core record model.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid shortcut: {0}")]
    InvalidShortcut(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("shortcut already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for RegistryError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortcut(message) => Self::InvalidInput(message),
        }
    }
}
