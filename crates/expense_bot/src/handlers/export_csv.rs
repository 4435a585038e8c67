//! Full-history CSV export, delivered as a file attachment.

use async_trait::async_trait;
use chrono::SecondsFormat;
use expense_core::{ExpenseRecord, MenuAction};
use expense_storage::LedgerStore;
use telegram_client::Update;

use crate::dispatcher::{Handler, Outcome};

use super::{callback_data, callback_ids, Api, Store};

const EXPORT_FILENAME: &str = "expenses.csv";

pub struct ExportCsv {
    api: Api,
    store: Store,
}

impl ExportCsv {
    pub fn new(api: Api, store: Store) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl Handler for ExportCsv {
    fn name(&self) -> &'static str {
        "export_csv"
    }

    fn can_handle(&self, update: &Update) -> bool {
        callback_data(update) == Some(MenuAction::ExportCsv.as_callback_data())
    }

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome> {
        let Some(callback) = update.callback_query.as_ref() else {
            return Ok(Outcome::NotMine);
        };
        let Some((chat_id, user_id)) = callback_ids(callback) else {
            return Ok(Outcome::NotMine);
        };

        let rows = self.store.export_rows(user_id).await?;
        if rows.is_empty() {
            self.api
                .send_message(
                    chat_id,
                    "⬇️ Экспорт CSV\n\nПока нет расходов для экспорта.",
                    None,
                )
                .await?;
        } else {
            let bytes = build_csv(&rows)?;
            self.api
                .send_document(chat_id, EXPORT_FILENAME, bytes)
                .await?;
        }

        self.api.answer_callback_query(&callback.id).await?;
        Ok(Outcome::Consumed)
    }
}

/// Oldest-first rows as UTF-8 CSV with a header.
fn build_csv(rows: &[ExpenseRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["created_at", "category", "store", "amount", "note"])?;
    for row in rows {
        writer.write_record([
            row.created_at
                .to_rfc3339_opts(SecondsFormat::Secs, true)
                .as_str(),
            row.category.as_str(),
            row.store.as_str(),
            format!("{:.2}", row.amount).as_str(),
            row.note.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("csv flush failed: {err}"))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    fn record(amount: &str, note: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: 1,
            user_id: 1,
            created_at: Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).single().unwrap(),
            category: "Еда".into(),
            store: "Ozon".into(),
            amount: Decimal::from_str(amount).unwrap(),
            note: note.into(),
        }
    }

    #[test]
    fn csv_has_header_and_two_decimal_amounts() {
        let bytes = build_csv(&[record("125.5", "обед")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("created_at,category,store,amount,note"));
        assert_eq!(
            lines.next(),
            Some("2026-03-05T10:00:00Z,Еда,Ozon,125.50,обед")
        );
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let bytes = build_csv(&[record("10", "молоко, хлеб \"особый\"")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"молоко, хлеб \"\"особый\"\"\""));
    }
}
