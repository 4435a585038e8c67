//! Per-category totals for the current UTC month.

use async_trait::async_trait;
use chrono::Utc;
use expense_core::MenuAction;
use expense_storage::LedgerStore;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};
use crate::keyboards;

use super::{callback_data, callback_ids, Api, Store};

pub struct MonthlyReport {
    api: Api,
    store: Store,
}

impl MonthlyReport {
    pub fn new(api: Api, store: Store) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl Handler for MonthlyReport {
    fn name(&self) -> &'static str {
        "monthly_report"
    }

    fn can_handle(&self, update: &Update) -> bool {
        callback_data(update) == Some(MenuAction::Report.as_callback_data())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(callback) = update.callback_query.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let Some((chat_id, user_id)) = callback_ids(callback) else {
            return Ok(Outcome::NotMine);
        };

        let month = Utc::now().format("%Y-%m").to_string();
        let report = self.store.monthly_by_category(user_id, &month).await?;

        let text = if report.rows.is_empty() {
            format!("📅 Отчёт за <b>{month}</b>\n\nПока нет записей за этот месяц.")
        } else {
            let mut lines = vec![format!("📅 Отчёт за <b>{month}</b>\n")];
            for row in &report.rows {
                lines.push(format!("• <b>{}</b> — {:.2}", row.category, row.total));
            }
            lines.push(String::new());
            lines.push(format!("Итого за месяц: <b>{:.2}</b>", report.total));
            lines.join("\n")
        };

        self.api
            .send_message(chat_id, &text, Some(keyboards::back_to_menu()))
            .await?;
        self.api.answer_callback_query(&callback.id).await?;
        Ok(Outcome::Consumed)
    }
}
