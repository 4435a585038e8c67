//! Rolling sum over the last N expenses.

use async_trait::async_trait;
use expense_core::MenuAction;
use expense_storage::LedgerStore;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};

use super::{callback_data, callback_ids, Api, Store};

pub struct SumRecent {
    api: Api,
    store: Store,
    limit: u32,
}

impl SumRecent {
    pub fn new(api: Api, store: Store) -> Self {
        Self {
            api,
            store,
            limit: 10,
        }
    }
}

#[async_trait]
impl Handler for SumRecent {
    fn name(&self) -> &'static str {
        "sum_recent"
    }

    fn can_handle(&self, update: &Update) -> bool {
        callback_data(update) == Some(MenuAction::Sum10.as_callback_data())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(callback) = update.callback_query.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let Some((chat_id, user_id)) = callback_ids(callback) else {
            return Ok(Outcome::NotMine);
        };

        let sum = self.store.sum_recent(user_id, self.limit).await?;
        let text = format!("Сумма последних {}: {:.2}", self.limit, sum);
        self.api.send_message(chat_id, &text, None).await?;
        self.api.answer_callback_query(&callback.id).await?;
        Ok(Outcome::Consumed)
    }
}
