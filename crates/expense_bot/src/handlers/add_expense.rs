//! The add-expense dialog engine.
//!
//! Claims dialog callback tokens and, while a dialog expects typed
//! input, plain text messages. Every step is one pure `transition`
//! call; this handler only performs the resulting effect: delete the
//! previous prompt, send the next one, persist the session, insert the
//! ledger row on save.

use async_trait::async_trait;
use expense_core::{CallbackToken, NewExpense};
use expense_state::{transition, Session, StepEffect, StepInput};
use expense_storage::{LedgerStore, SessionStore};
use telegram_client::{InlineKeyboardMarkup, Update};
use tracing::debug;

use crate::dispatcher::{Handler, Outcome};
use crate::{keyboards, vocab};

use super::{callback_data, callback_ids, Api, Store};

pub struct AddExpense {
    api: Api,
    store: Store,
}

impl AddExpense {
    pub fn new(api: Api, store: Store) -> Self {
        Self { api, store }
    }

    fn dialog_command(update: &Update) -> Option<expense_state::DialogCommand> {
        let token = CallbackToken::parse(callback_data(update)?)?;
        expense_state::DialogCommand::from_token(&token)
    }

    async fn step(
        &self,
        chat_id: i64,
        user_id: i64,
        session: Session,
        input: StepInput<'_>,
    ) -> anyhow::Result<Outcome> {
        let previous_prompt = session.draft.last_prompt_id;
        let result = transition(session, input);
        self.apply(chat_id, user_id, result.session, previous_prompt, result.effect)
            .await
    }

    async fn apply(
        &self,
        chat_id: i64,
        user_id: i64,
        session: Session,
        previous_prompt: Option<i64>,
        effect: StepEffect,
    ) -> anyhow::Result<Outcome> {
        match effect {
            StepEffect::PromptCategoryText => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "Введите <b>новую категорию</b> текстом. Или нажмите «❌ Отмена».",
                    None,
                )
                .await
            }
            StepEffect::RejectEmptyCategory => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "Категория не должна быть пустой. Введите название или нажмите «❌ Отмена».",
                    None,
                )
                .await
            }
            StepEffect::PromptStoreChoice => {
                let names = vocab::user_stores(self.store.as_ref(), user_id).await?;
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "<b>Выберите магазин</b>:",
                    Some(keyboards::stores(&names)),
                )
                .await
            }
            StepEffect::PromptStoreText => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "Введите <b>новый магазин</b> текстом. Или нажмите «❌ Отмена».",
                    None,
                )
                .await
            }
            StepEffect::RejectEmptyStore => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "Магазин не должен быть пустым. Введите название или нажмите «❌ Отмена».",
                    None,
                )
                .await
            }
            StepEffect::PromptAmount => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "Введите сумму (пример: <b>125.50</b>). Или нажмите «❌ Отмена».",
                    Some(keyboards::cancel_only()),
                )
                .await
            }
            StepEffect::RejectAmount => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "Сумма должна быть <b>положительным числом</b>. Пример: <b>125.50</b>",
                    None,
                )
                .await
            }
            StepEffect::PromptNote => {
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    "<b>Введите заметку</b> (или нажмите «Пропустить заметку»):",
                    Some(keyboards::note()),
                )
                .await
            }
            StepEffect::PromptConfirm => {
                let text = confirm_summary(&session);
                self.prompt(
                    chat_id,
                    user_id,
                    session,
                    previous_prompt,
                    &text,
                    Some(keyboards::confirm()),
                )
                .await
            }
            StepEffect::Save {
                category,
                store,
                amount,
                note,
            } => {
                self.delete_prompt(chat_id, previous_prompt).await;
                self.store
                    .insert(&NewExpense {
                        user_id,
                        category,
                        store,
                        amount,
                        note,
                    })
                    .await?;
                self.store.save(user_id, &session).await?;
                self.api
                    .send_message(
                        chat_id,
                        "Готово ✔️ <b>Запись сохранена.</b>",
                        Some(keyboards::after_save()),
                    )
                    .await?;
                Ok(Outcome::Consumed)
            }
            StepEffect::MissingData => {
                self.delete_prompt(chat_id, previous_prompt).await;
                self.store.save(user_id, &session).await?;
                self.api
                    .send_message(
                        chat_id,
                        "Не удалось сохранить — отсутствуют данные. Попробуйте снова: <b>/start</b>.",
                        None,
                    )
                    .await?;
                Ok(Outcome::Consumed)
            }
            StepEffect::Cancelled => {
                self.delete_prompt(chat_id, previous_prompt).await;
                self.store.save(user_id, &session).await?;
                self.api
                    .send_message(
                        chat_id,
                        "Операция отменена. Откройте меню командой <b>/start</b>.",
                        None,
                    )
                    .await?;
                Ok(Outcome::Consumed)
            }
            // The button spinner is cleared by the caller's ack; the
            // catch-all gets its turn to reply.
            StepEffect::Stale => Ok(Outcome::Handled),
        }
    }

    /// Delete the previous prompt, send the next one, remember its id.
    async fn prompt(
        &self,
        chat_id: i64,
        user_id: i64,
        mut session: Session,
        previous_prompt: Option<i64>,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<Outcome> {
        self.delete_prompt(chat_id, previous_prompt).await;
        let sent = self.api.send_message(chat_id, text, keyboard).await?;
        session.draft.last_prompt_id = Some(sent.message_id);
        self.store.save(user_id, &session).await?;
        Ok(Outcome::Consumed)
    }

    /// Best effort: the message may already be gone.
    async fn delete_prompt(&self, chat_id: i64, message_id: Option<i64>) {
        if let Some(message_id) = message_id {
            if let Err(err) = self.api.delete_message(chat_id, message_id).await {
                debug!(chat_id, message_id, %err, "prompt delete failed");
            }
        }
    }

    async fn ack(&self, callback_query_id: &str) {
        if let Err(err) = self.api.answer_callback_query(callback_query_id).await {
            debug!(%err, "answerCallbackQuery failed");
        }
    }
}

fn confirm_summary(session: &Session) -> String {
    let draft = &session.draft;
    let category = draft.category.as_deref().unwrap_or("—");
    let store = draft.store.as_deref().unwrap_or("—");
    let amount = draft
        .amount
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| "—".to_string());
    let note = match draft.note.as_deref() {
        Some(note) if !note.is_empty() => note,
        _ => "—",
    };
    format!(
        "<b>Проверьте данные</b>:\n\
         <b>Категория:</b> {category}\n\
         <b>Магазин:</b> {store}\n\
         <b>Сумма:</b> {amount}\n\
         <b>Заметка:</b> {note}"
    )
}

#[async_trait]
impl Handler for AddExpense {
    fn name(&self) -> &'static str {
        "add_expense"
    }

    fn can_handle(&self, update: &Update) -> bool {
        if update.callback_query.is_some() {
            return Self::dialog_command(update).is_some();
        }
        // Text is claimed tentatively; `handle` declines when no dialog
        // is waiting for typed input.
        update
            .message
            .as_ref()
            .is_some_and(|message| message.text.is_some())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        if let Some(callback) = update.callback_query.as_ref() {
            let Some(command) = Self::dialog_command(update) else {
                return Ok(Outcome::NotMine);
            };
            let Some((chat_id, user_id)) = callback_ids(callback) else {
                return Ok(Outcome::NotMine);
            };

            let session = self.store.load(user_id).await?;
            let outcome = self
                .step(chat_id, user_id, session, StepInput::Command(command))
                .await?;
            self.ack(&callback.id).await;
            return Ok(outcome);
        }

        let Some(message) = update.message.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let (Some(text), Some(from)) = (message.text.as_deref(), message.from.as_ref()) else {
            return Ok(Outcome::NotMine);
        };
        let user_id = from.id;

        let session = self.store.load(user_id).await?;
        if !session.state.accepts_text() || session.draft.expect_text.is_none() {
            return Ok(Outcome::NotMine);
        }

        // The read-modify-write is a single read: this session flows
        // straight into the transition.
        self.step(message.chat.id, user_id, session, StepInput::Text(text.trim()))
            .await
    }
}
