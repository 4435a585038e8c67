//! Catch-alls. Registered last so everything else gets a look first.

use async_trait::async_trait;
use telegram_client::Update;
use tracing::debug;

use crate::dispatcher::{Handler, Outcome};

use super::{callback_ids, Api};

/// Any callback query nothing else consumed.
pub struct UnknownCallback {
    api: Api,
}

impl UnknownCallback {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Handler for UnknownCallback {
    fn name(&self) -> &'static str {
        "unknown_callback"
    }

    fn can_handle(&self, update: &Update) -> bool {
        update.callback_query.is_some()
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(callback) = update.callback_query.as_ref() else {
            return Ok(Outcome::NotMine);
        };

        if let Some((chat_id, _)) = callback_ids(callback) {
            self.api
                .send_message(
                    chat_id,
                    "Не понял эту кнопку. Откройте меню командой /start.",
                    None,
                )
                .await?;
        }
        // The dialog engine may have acked this one already.
        if let Err(err) = self.api.answer_callback_query(&callback.id).await {
            debug!(%err, "answerCallbackQuery failed");
        }
        Ok(Outcome::Consumed)
    }
}

/// Any plain text message nothing else consumed.
pub struct UnknownText {
    api: Api,
}

impl UnknownText {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Handler for UnknownText {
    fn name(&self) -> &'static str {
        "unknown_text"
    }

    fn can_handle(&self, update: &Update) -> bool {
        update
            .message
            .as_ref()
            .is_some_and(|message| message.text.is_some())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(message) = update.message.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        self.api
            .send_message(
                message.chat.id,
                "Не понял сообщение. Нажмите /start, чтобы открыть меню.",
                None,
            )
            .await?;
        Ok(Outcome::Consumed)
    }
}
