//! Last-N expenses as a plain text list.

use async_trait::async_trait;
use chrono::SecondsFormat;
use expense_core::MenuAction;
use expense_storage::LedgerStore;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};
use crate::keyboards;

use super::{callback_data, callback_ids, Api, Store};

pub struct Recent {
    api: Api,
    store: Store,
    limit: u32,
}

impl Recent {
    pub fn new(api: Api, store: Store) -> Self {
        Self {
            api,
            store,
            limit: 10,
        }
    }
}

#[async_trait]
impl Handler for Recent {
    fn name(&self) -> &'static str {
        "recent"
    }

    fn can_handle(&self, update: &Update) -> bool {
        callback_data(update) == Some(MenuAction::Recent.as_callback_data())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(callback) = update.callback_query.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let Some((chat_id, user_id)) = callback_ids(callback) else {
            return Ok(Outcome::NotMine);
        };

        let rows = self.store.recent(user_id, self.limit).await?;
        let text = if rows.is_empty() {
            "Пока нет записей.".to_string()
        } else {
            let lines: Vec<String> = rows
                .iter()
                .map(|row| {
                    let mut line = format!(
                        "{} — {} @ {} : {}",
                        row.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                        row.category,
                        row.store,
                        row.amount,
                    );
                    if !row.note.is_empty() {
                        line.push_str(" — ");
                        line.push_str(&row.note);
                    }
                    line
                })
                .collect();
            format!("Последние записи:\n{}", lines.join("\n"))
        };

        self.api
            .send_message(chat_id, &text, Some(keyboards::back_to_menu()))
            .await?;
        self.api.answer_callback_query(&callback.id).await?;
        Ok(Outcome::Consumed)
    }
}
