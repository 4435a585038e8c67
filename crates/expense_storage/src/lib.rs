//! expense_storage - SQLite-backed persistence for the expense bot
//!
//! Two narrow store traits sit in front of one SQLite file:
//! - [`SessionStore`] - the per-user `(state, payload)` row the FSM
//!   reads and writes on every step;
//! - [`LedgerStore`] - the append-only expense ledger and its
//!   aggregate queries (recent, rolling sum, monthly report, export).
//!
//! `SqliteStore` implements both. Every call opens a connection inside
//! `tokio::task::spawn_blocking` and runs a single auto-committing
//! statement (or read), so no transaction ever spans a user decision.

pub mod error;
pub mod ledger;
pub mod session;
pub mod sqlite;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use ledger::{CategoryTotal, LedgerStore, MonthlyReport};
pub use session::SessionStore;
pub use sqlite::SqliteStore;
