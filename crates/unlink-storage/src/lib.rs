pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use unlink_core::repository::{ReadRepository, Repository, Result};
pub use unlink_core::StorageError;
