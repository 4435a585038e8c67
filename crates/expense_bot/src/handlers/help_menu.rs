//! Full feature help, reached from the main menu.

use async_trait::async_trait;
use expense_core::MenuAction;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};
use crate::keyboards;

use super::{callback_data, callback_ids, Api};

const HELP_TEXT: &str = "<b>ℹ️ Справка по боту учёта расходов</b>\n\n\
    Этот бот позволяет быстро фиксировать ежедневные траты.\n\
    Доступные функции:\n\n\
    • <b>➕ Добавить</b> — по шагам указать категорию, магазин, сумму и заметку.\n\
    • <b>🕘 Последние</b> — список последних 10 записей.\n\
    • <b>🔟 Сумма 10</b> — сумма последних 10 расходов.\n\
    • <b>📅 Отчёт (месяц)</b> — сумма по категориям за текущий месяц.\n\
    • <b>📄 CSV</b> — экспорт всех расходов файлом в формате CSV.\n\n\
    <b>Как добавить расход:</b>\n\
    1) Нажмите «➕ Добавить».\n\
    2) Выберите категорию или создайте новую.\n\
    3) Выберите магазин или добавьте новый.\n\
    4) Введите сумму (например: 125.50).\n\
    5) Добавьте заметку или пропустите.\n\
    6) Проверьте данные и нажмите «Сохранить».\n\n\
    Если возникнут вопросы — просто напишите /help.";

pub struct HelpMenu {
    api: Api,
}

impl HelpMenu {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Handler for HelpMenu {
    fn name(&self) -> &'static str {
        "help_menu"
    }

    fn can_handle(&self, update: &Update) -> bool {
        callback_data(update) == Some(MenuAction::Help.as_callback_data())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(callback) = update.callback_query.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let Some((chat_id, _)) = callback_ids(callback) else {
            return Ok(Outcome::NotMine);
        };

        self.api
            .send_message(chat_id, HELP_TEXT, Some(keyboards::back_to_menu()))
            .await?;
        self.api.answer_callback_query(&callback.id).await?;
        Ok(Outcome::Consumed)
    }
}
