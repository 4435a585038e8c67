//! SQLite implementation of both stores.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use expense_core::{ExpenseRecord, NewExpense};
use expense_state::{DialogState, Session};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::error::{StorageError, StorageResult};
use crate::ledger::{CategoryTotal, LedgerStore, MonthlyReport};
use crate::session::SessionStore;

/// One SQLite file holding the session table and the ledger.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Create tables and indexes. Safe to call repeatedly.
    pub async fn init(&self) -> StorageResult<()> {
        self.with_connection(|connection| {
            connection.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS expenses (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id    INTEGER NOT NULL,
                    created_at TEXT    NOT NULL,
                    category   TEXT    NOT NULL,
                    store      TEXT    NOT NULL,
                    amount     TEXT    NOT NULL,
                    note       TEXT    NOT NULL DEFAULT ''
                );

                CREATE TABLE IF NOT EXISTS user_state (
                    user_id INTEGER PRIMARY KEY,
                    state   TEXT    NOT NULL,
                    payload TEXT    NOT NULL DEFAULT '{}'
                );

                CREATE INDEX IF NOT EXISTS idx_expenses_user_created
                    ON expenses(user_id, created_at);
                "#,
            )?;
            Ok(())
        })
        .await
    }

    async fn with_connection<T, F>(&self, func: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open_connection(&db_path)?;
            func(&connection)
        })
        .await
        .map_err(|error| StorageError::Task(error.to_string()))?
    }

    async fn insert_at(
        &self,
        expense: NewExpense,
        created_at: DateTime<Utc>,
    ) -> StorageResult<i64> {
        self.with_connection(move |connection| {
            connection.execute(
                "INSERT INTO expenses(user_id, created_at, category, store, amount, note) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    expense.user_id,
                    format_timestamp(created_at),
                    expense.category.trim(),
                    expense.store.trim(),
                    expense.amount.to_string(),
                    expense.note.trim(),
                ],
            )?;
            Ok(connection.last_insert_rowid())
        })
        .await
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn load(&self, user_id: i64) -> StorageResult<Session> {
        self.with_connection(move |connection| {
            let row = connection
                .query_row(
                    "SELECT state, payload FROM user_state WHERE user_id = ?1",
                    params![user_id],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
                )
                .optional()?;

            let Some((state_raw, payload_raw)) = row else {
                return Ok(Session::idle());
            };

            let state = DialogState::from_db(&state_raw).ok_or_else(|| {
                StorageError::InvalidData(format!("unknown dialog state: {state_raw}"))
            })?;
            let draft = serde_json::from_str(&payload_raw)?;

            Ok(Session { state, draft })
        })
        .await
    }

    async fn save(&self, user_id: i64, session: &Session) -> StorageResult<()> {
        let state = session.state.as_str();
        let payload = serde_json::to_string(&session.draft)?;

        self.with_connection(move |connection| {
            connection.execute(
                "INSERT INTO user_state(user_id, state, payload) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(user_id) DO UPDATE SET state = excluded.state, payload = excluded.payload",
                params![user_id, state, payload],
            )?;
            Ok(())
        })
        .await
    }

    async fn reset(&self, user_id: i64) -> StorageResult<()> {
        self.with_connection(move |connection| {
            connection.execute(
                "INSERT INTO user_state(user_id, state, payload) VALUES (?1, 'IDLE', '{}') \
                 ON CONFLICT(user_id) DO UPDATE SET state = 'IDLE', payload = '{}'",
                params![user_id],
            )?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl LedgerStore for SqliteStore {
    async fn insert(&self, expense: &NewExpense) -> StorageResult<i64> {
        self.insert_at(expense.clone(), Utc::now()).await
    }

    async fn recent(&self, user_id: i64, limit: u32) -> StorageResult<Vec<ExpenseRecord>> {
        self.with_connection(move |connection| {
            let mut stmt = connection.prepare(
                "SELECT id, user_id, created_at, category, store, amount, note \
                 FROM expenses WHERE user_id = ?1 \
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?;
            read_records(&mut stmt, params![user_id, limit])
        })
        .await
    }

    async fn sum_recent(&self, user_id: i64, limit: u32) -> StorageResult<Decimal> {
        self.with_connection(move |connection| {
            let mut stmt = connection.prepare(
                "SELECT amount FROM expenses WHERE user_id = ?1 \
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?;
            let mut rows = stmt.query(params![user_id, limit])?;
            let mut sum = Decimal::ZERO;
            while let Some(row) = rows.next()? {
                sum += parse_amount_column(&row.get::<_, String>(0)?)?;
            }
            Ok(sum)
        })
        .await
    }

    async fn monthly_by_category(
        &self,
        user_id: i64,
        month: &str,
    ) -> StorageResult<MonthlyReport> {
        let month = month.to_string();
        self.with_connection(move |connection| {
            let mut stmt = connection.prepare(
                "SELECT category, amount FROM expenses \
                 WHERE user_id = ?1 AND strftime('%Y-%m', created_at) = ?2",
            )?;
            let mut rows = stmt.query(params![user_id, month])?;

            // Aggregated in Rust over Decimal; SQL SUM would go through
            // floating point.
            let mut by_category: HashMap<String, Decimal> = HashMap::new();
            let mut total = Decimal::ZERO;
            while let Some(row) = rows.next()? {
                let category: String = row.get(0)?;
                let amount = parse_amount_column(&row.get::<_, String>(1)?)?;
                *by_category.entry(category).or_insert(Decimal::ZERO) += amount;
                total += amount;
            }

            let mut report_rows: Vec<CategoryTotal> = by_category
                .into_iter()
                .map(|(category, total)| CategoryTotal { category, total })
                .collect();
            report_rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

            Ok(MonthlyReport {
                month,
                rows: report_rows,
                total,
            })
        })
        .await
    }

    async fn export_rows(&self, user_id: i64) -> StorageResult<Vec<ExpenseRecord>> {
        self.with_connection(move |connection| {
            let mut stmt = connection.prepare(
                "SELECT id, user_id, created_at, category, store, amount, note \
                 FROM expenses WHERE user_id = ?1 \
                 ORDER BY created_at ASC, id ASC",
            )?;
            read_records(&mut stmt, params![user_id])
        })
        .await
    }

    async fn categories(&self, user_id: i64) -> StorageResult<Vec<String>> {
        self.with_connection(move |connection| {
            let mut stmt = connection.prepare(
                "SELECT DISTINCT category FROM expenses WHERE user_id = ?1 \
                 ORDER BY category COLLATE NOCASE",
            )?;
            let names = stmt
                .query_map(params![user_id], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(names)
        })
        .await
    }

    async fn stores(&self, user_id: i64) -> StorageResult<Vec<String>> {
        self.with_connection(move |connection| {
            let mut stmt = connection.prepare(
                "SELECT DISTINCT store FROM expenses WHERE user_id = ?1 \
                 ORDER BY store COLLATE NOCASE",
            )?;
            let names = stmt
                .query_map(params![user_id], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(names)
        })
        .await
    }
}

fn open_connection(path: &Path) -> StorageResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(path)?;
    connection.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA foreign_keys = ON;
        PRAGMA synchronous = NORMAL;
        "#,
    )?;
    Ok(connection)
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

fn parse_amount_column(raw: &str) -> StorageResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|_| StorageError::InvalidData(format!("bad amount in ledger: {raw}")))
}

fn read_records(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> StorageResult<Vec<ExpenseRecord>> {
    let mut rows = stmt.query(params)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(ExpenseRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            created_at: parse_timestamp(&row.get::<_, String>(2)?)?,
            category: row.get(3)?,
            store: row.get(4)?,
            amount: parse_amount_column(&row.get::<_, String>(5)?)?,
            note: row.get(6)?,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use expense_state::{ExpenseDraft, TextField};
    use tempfile::tempdir;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn expense(user_id: i64, category: &str, store: &str, amount: &str) -> NewExpense {
        NewExpense {
            user_id,
            category: category.into(),
            store: store.into(),
            amount: dec(amount),
            note: String::new(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    async fn store_in(dir: &tempfile::TempDir) -> SqliteStore {
        let store = SqliteStore::new(dir.path().join("budget.sqlite3"));
        store.init().await.expect("init schema");
        store
    }

    #[tokio::test]
    async fn missing_session_reads_as_idle() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let session = store.load(1).await.expect("load");
        assert_eq!(session, Session::idle());
    }

    #[tokio::test]
    async fn session_round_trips_and_resets() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let session = Session {
            state: DialogState::AskAmount,
            draft: ExpenseDraft {
                category: Some("Еда".into()),
                store: Some("Ozon".into()),
                expect_text: Some(TextField::Amount),
                last_prompt_id: Some(99),
                ..Default::default()
            },
        };
        store.save(7, &session).await.expect("save");
        assert_eq!(store.load(7).await.expect("load"), session);

        store.reset(7).await.expect("reset");
        assert_eq!(store.load(7).await.expect("load"), Session::idle());
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_user() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let session = Session::start_dialog();
        store.save(1, &session).await.expect("save");

        assert_eq!(store.load(1).await.expect("load"), session);
        assert_eq!(store.load(2).await.expect("load"), Session::idle());
    }

    #[tokio::test]
    async fn recent_returns_newest_first_with_limit() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        for (i, amount) in ["10", "20", "30"].iter().enumerate() {
            store
                .insert_at(expense(1, "Еда", "Магнит", amount), at(2026, 3, 1, i as u32))
                .await
                .expect("insert");
        }

        let rows = store.recent(1, 2).await.expect("recent");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount, dec("30"));
        assert_eq!(rows[1].amount, dec("20"));
    }

    #[tokio::test]
    async fn sum_recent_covers_only_the_last_n() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        for (i, amount) in ["100", "1.25", "2.75"].iter().enumerate() {
            store
                .insert_at(expense(1, "Еда", "Магнит", amount), at(2026, 3, 1, i as u32))
                .await
                .expect("insert");
        }

        assert_eq!(store.sum_recent(1, 2).await.expect("sum"), dec("4.00"));
        assert_eq!(store.sum_recent(1, 10).await.expect("sum"), dec("104.00"));
        assert_eq!(store.sum_recent(2, 10).await.expect("sum"), Decimal::ZERO);
    }

    #[tokio::test]
    async fn monthly_report_excludes_other_months() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store
            .insert_at(expense(1, "Еда", "Магнит", "100.50"), at(2026, 3, 5, 10))
            .await
            .expect("insert");
        store
            .insert_at(expense(1, "Транспорт", "Метро", "40"), at(2026, 3, 20, 9))
            .await
            .expect("insert");
        // Prior month: must not appear anywhere in the report.
        store
            .insert_at(expense(1, "Еда", "Магнит", "999"), at(2026, 2, 28, 23))
            .await
            .expect("insert");

        let report = store
            .monthly_by_category(1, "2026-03")
            .await
            .expect("report");
        assert_eq!(report.month, "2026-03");
        assert_eq!(report.total, dec("140.50"));
        assert_eq!(
            report.rows,
            vec![
                CategoryTotal {
                    category: "Еда".into(),
                    total: dec("100.50"),
                },
                CategoryTotal {
                    category: "Транспорт".into(),
                    total: dec("40"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn export_rows_come_back_oldest_first() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store
            .insert_at(expense(1, "Еда", "Магнит", "2"), at(2026, 3, 2, 0))
            .await
            .expect("insert");
        store
            .insert_at(expense(1, "Кафе", "Лента", "1"), at(2026, 3, 1, 0))
            .await
            .expect("insert");

        let rows = store.export_rows(1).await.expect("export");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount, dec("1"));
        assert_eq!(rows[1].amount, dec("2"));
    }

    #[tokio::test]
    async fn vocab_queries_are_distinct_and_case_insensitive_sorted() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        for (category, store_name) in [
            ("еда", "ozon"),
            ("Еда", "Ozon"),
            ("Аптека", "Магнит"),
        ] {
            store
                .insert_at(expense(1, category, store_name, "1"), at(2026, 3, 1, 0))
                .await
                .expect("insert");
        }

        let categories = store.categories(1).await.expect("categories");
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0], "Аптека");

        // NOCASE folds only ASCII, so the Latin names group first.
        let stores = store.stores(1).await.expect("stores");
        assert_eq!(stores.len(), 3);
        assert_eq!(stores[2], "Магнит");
    }

    #[tokio::test]
    async fn insert_trims_names_and_keeps_amount_exact() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let id = store
            .insert(&NewExpense {
                user_id: 5,
                category: " Еда ".into(),
                store: " Ozon ".into(),
                amount: dec("125.50"),
                note: " обед ".into(),
            })
            .await
            .expect("insert");
        assert!(id > 0);

        let rows = store.recent(5, 1).await.expect("recent");
        assert_eq!(rows[0].category, "Еда");
        assert_eq!(rows[0].store, "Ozon");
        assert_eq!(rows[0].amount, dec("125.50"));
        assert_eq!(rows[0].note, "обед");
    }
}
