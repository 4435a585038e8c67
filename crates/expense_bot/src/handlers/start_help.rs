//! `/start` and `/help` commands: render the main menu.

use async_trait::async_trait;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};
use crate::keyboards;

use super::Api;

const HELP_TEXT: &str = "Бот учёта расходов.\n\
    Используйте меню ниже, чтобы добавить расход, посмотреть последние записи, \
    экспортировать CSV и т.д.";

pub struct StartHelp {
    api: Api,
}

impl StartHelp {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Handler for StartHelp {
    fn name(&self) -> &'static str {
        "start_help"
    }

    fn can_handle(&self, update: &Update) -> bool {
        let Some(text) = update.message.as_ref().and_then(|m| m.text.as_deref()) else {
            return false;
        };
        text.starts_with("/start") || text.starts_with("/help")
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(message) = update.message.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let chat_id = message.chat.id;

        if message.text.as_deref().unwrap_or("").starts_with("/help") {
            self.api.send_message(chat_id, HELP_TEXT, None).await?;
        }
        self.api
            .send_message(chat_id, "Главное меню:", Some(keyboards::main_menu()))
            .await?;
        Ok(Outcome::Consumed)
    }
}
