//! Per-user dialog session persistence.

use async_trait::async_trait;
use expense_state::Session;

use crate::error::StorageResult;

/// Persists one `(state, payload)` row per user.
///
/// Absence of a row is equivalent to an idle session with an empty
/// draft; `load` never distinguishes the two.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the user's session, defaulting to `Session::idle()`.
    async fn load(&self, user_id: i64) -> StorageResult<Session>;

    /// Upsert the user's session.
    async fn save(&self, user_id: i64, session: &Session) -> StorageResult<()>;

    /// Reset the user's session to idle with an empty draft.
    async fn reset(&self, user_id: i64) -> StorageResult<()>;
}
