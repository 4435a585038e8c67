//! Top-level menu callbacks that change screens: start the add-expense
//! dialog or return to the main menu.

use async_trait::async_trait;
use expense_core::{CallbackToken, MenuAction};
use expense_state::Session;
use expense_storage::SessionStore;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};
use crate::{keyboards, vocab};

use super::{callback_data, callback_ids, Api, Store};

pub struct Menu {
    api: Api,
    store: Store,
}

impl Menu {
    pub fn new(api: Api, store: Store) -> Self {
        Self { api, store }
    }

    fn action(update: &Update) -> Option<MenuAction> {
        match CallbackToken::parse(callback_data(update)?) {
            Some(CallbackToken::Menu(action @ (MenuAction::Add | MenuAction::Main))) => {
                Some(action)
            }
            _ => None,
        }
    }
}

#[async_trait]
impl Handler for Menu {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn can_handle(&self, update: &Update) -> bool {
        Self::action(update).is_some()
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let (Some(callback), Some(action)) = (update.callback_query.as_ref(), Self::action(update))
        else {
            return Ok(Outcome::NotMine);
        };
        let Some((chat_id, user_id)) = callback_ids(callback) else {
            return Ok(Outcome::NotMine);
        };

        match action {
            MenuAction::Add => {
                let mut session = Session::start_dialog();
                let names = vocab::user_categories(self.store.as_ref(), user_id).await?;
                let prompt = self
                    .api
                    .send_message(
                        chat_id,
                        "Выберите категорию:",
                        Some(keyboards::categories(&names)),
                    )
                    .await?;
                // Remember the prompt so the next step can delete it.
                session.draft.last_prompt_id = Some(prompt.message_id);
                self.store.save(user_id, &session).await?;
            }
            _ => {
                self.api
                    .send_message(chat_id, "Главное меню:", Some(keyboards::main_menu()))
                    .await?;
            }
        }

        self.api.answer_callback_query(&callback.id).await?;
        Ok(Outcome::Consumed)
    }
}
