//! Database trait definition

use crate::error::DbResult;

/// Database abstraction trait for Migrate
///
/// Migrations are handed over as opaque text; implementations must not
/// assume a transaction around the batch. File content that is not valid
/// UTF-8 reaches `execute_batch` with the invalid bytes replaced by U+FFFD.
pub trait Database: Send + Sync {
    /// Execute a batch of SQL statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
