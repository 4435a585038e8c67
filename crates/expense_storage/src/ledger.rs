//! The append-only expense ledger and its aggregate queries.

use async_trait::async_trait;
use expense_core::{ExpenseRecord, NewExpense};
use rust_decimal::Decimal;

use crate::error::StorageResult;

/// One category's total within a monthly report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Per-category breakdown for one `YYYY-MM` month, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub month: String,
    pub rows: Vec<CategoryTotal>,
    pub total: Decimal,
}

/// The expense ledger. Rows are append-only: there is no update or
/// delete operation, deliberately.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert one expense; the store assigns `id` and `created_at`.
    /// Returns the new row id.
    async fn insert(&self, expense: &NewExpense) -> StorageResult<i64>;

    /// The most recent `limit` records, newest first.
    async fn recent(&self, user_id: i64, limit: u32) -> StorageResult<Vec<ExpenseRecord>>;

    /// Sum over the most recent `limit` records.
    async fn sum_recent(&self, user_id: i64, limit: u32) -> StorageResult<Decimal>;

    /// Per-category totals and grand total for one `YYYY-MM` month.
    async fn monthly_by_category(
        &self,
        user_id: i64,
        month: &str,
    ) -> StorageResult<MonthlyReport>;

    /// Full history, oldest first, for CSV export.
    async fn export_rows(&self, user_id: i64) -> StorageResult<Vec<ExpenseRecord>>;

    /// Distinct categories the user has recorded, case-insensitive order.
    async fn categories(&self, user_id: i64) -> StorageResult<Vec<String>>;

    /// Distinct stores the user has recorded, case-insensitive order.
    async fn stores(&self, user_id: i64) -> StorageResult<Vec<String>>;
}
