//! expense_core - Core types and vocabulary for the expense bot
//!
//! This crate provides the foundational types used across all bot crates:
//! - `expense` - ExpenseRecord, NewExpense ledger types
//! - `token` - the callback-data vocabulary (`NAMESPACE::VALUE` tokens)
//! - `amount` - user-entered amount parsing
//! - `config` - environment-driven bot configuration

pub mod amount;
pub mod config;
pub mod expense;
pub mod token;

// Re-export commonly used types
pub use amount::parse_amount;
pub use config::{BotConfig, ConfigError};
pub use expense::{ExpenseRecord, NewExpense};
pub use token::{CallbackToken, CategoryChoice, ConfirmAction, MenuAction, StoreChoice};
