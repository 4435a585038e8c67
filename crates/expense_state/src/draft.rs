//! The typed dialog payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which text-shaped input the dialog is currently waiting for.
///
/// Serialized with the uppercase names the session rows have always
/// used (`"CATEGORY"`, `"AMOUNT"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextField {
    Category,
    Store,
    Amount,
    Note,
}

/// In-progress expense data, persisted as the session payload.
///
/// Each field is `Option` so "missing" is a type-level state rather
/// than a runtime key-absence check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Set while the dialog expects typed input instead of a button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_text: Option<TextField>,
    /// Message id of the most recent prompt, retracted before the next
    /// prompt is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_prompt_id: Option<i64>,
}

impl ExpenseDraft {
    /// True when every field the save transition requires is present.
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.store.is_some() && self.amount.is_some()
    }
}
