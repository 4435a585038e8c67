//! Ledger record types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully validated expense waiting to be inserted into the ledger.
///
/// `category` and `store` are trimmed and non-empty by the time this
/// struct exists; `amount` is strictly positive. The FSM's save
/// transition is the only producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub user_id: i64,
    pub category: String,
    pub store: String,
    pub amount: Decimal,
    pub note: String,
}

/// A row of the append-only ledger. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Store-assigned monotonic id.
    pub id: i64,
    pub user_id: i64,
    /// Assigned by the store at insert time (UTC).
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub store: String,
    pub amount: Decimal,
    pub note: String,
}
