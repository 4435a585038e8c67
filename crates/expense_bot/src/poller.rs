//! Long-polling loop with an update cursor.

use std::sync::Arc;
use std::time::Duration;

use telegram_client::{BotApi, Update};
use tracing::{debug, error, info};

use crate::dispatcher::Dispatcher;

const FETCH_FAILURE_PAUSE: Duration = Duration::from_secs(1);

/// Fetch updates forever and feed them to the dispatcher.
///
/// The cursor advances past every fetched update, including those whose
/// handling failed, so a poisonous update cannot wedge the loop.
pub async fn run(api: Arc<dyn BotApi>, dispatcher: Dispatcher, timeout_secs: u64) {
    info!("entering long-polling loop");
    let mut offset: Option<i64> = None;

    loop {
        let updates = match api.get_updates(offset, timeout_secs).await {
            Ok(updates) => updates,
            Err(err) => {
                error!(%err, "getUpdates failed");
                tokio::time::sleep(FETCH_FAILURE_PAUSE).await;
                continue;
            }
        };

        for update in &updates {
            debug!(update_id = update.update_id, "received update");
            if let Err(err) = dispatcher.dispatch(update).await {
                error!(update_id = update.update_id, %err, "update handling failed");
            }
        }

        if let Some(next) = next_offset(&updates) {
            offset = Some(next);
        }
    }
}

/// The offset acknowledging every update in `batch`.
fn next_offset(batch: &[Update]) -> Option<i64> {
    batch.iter().map(|update| update.update_id + 1).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(update_id: i64) -> Update {
        Update {
            update_id,
            message: None,
            callback_query: None,
        }
    }

    #[test]
    fn empty_batch_keeps_the_cursor() {
        assert_eq!(next_offset(&[]), None);
    }

    #[test]
    fn offset_points_past_the_highest_update() {
        let batch = [bare(7), bare(9), bare(8)];
        assert_eq!(next_offset(&batch), Some(10));
    }
}
