//! The handler chain, most specific first.
//!
//! Registration order matters: the dialog engine sits between the menu
//! router and the report handlers, and the two catch-alls go last.

pub mod add_expense;
pub mod export_csv;
pub mod help_menu;
pub mod menu;
pub mod monthly_report;
pub mod recent;
pub mod start_help;
pub mod sum_recent;
pub mod unknown;

use std::sync::Arc;

use expense_storage::SqliteStore;
use telegram_client::{BotApi, CallbackQuery, Update};

use crate::dispatcher::Dispatcher;

pub type Api = Arc<dyn BotApi>;
pub type Store = Arc<SqliteStore>;

/// Build the full chain in production order.
pub fn build_dispatcher(api: Api, store: Store) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Box::new(start_help::StartHelp::new(api.clone())));
    dispatcher.register(Box::new(menu::Menu::new(api.clone(), store.clone())));
    dispatcher.register(Box::new(add_expense::AddExpense::new(
        api.clone(),
        store.clone(),
    )));
    dispatcher.register(Box::new(recent::Recent::new(api.clone(), store.clone())));
    dispatcher.register(Box::new(sum_recent::SumRecent::new(
        api.clone(),
        store.clone(),
    )));
    dispatcher.register(Box::new(monthly_report::MonthlyReport::new(
        api.clone(),
        store.clone(),
    )));
    dispatcher.register(Box::new(export_csv::ExportCsv::new(api.clone(), store)));
    dispatcher.register(Box::new(help_menu::HelpMenu::new(api.clone())));
    dispatcher.register(Box::new(unknown::UnknownCallback::new(api.clone())));
    dispatcher.register(Box::new(unknown::UnknownText::new(api)));
    dispatcher
}

/// Chat and user ids of a callback query. `None` when Telegram sent the
/// callback without its origin message.
pub(crate) fn callback_ids(callback: &CallbackQuery) -> Option<(i64, i64)> {
    let chat_id = callback.message.as_ref()?.chat.id;
    Some((chat_id, callback.from.id))
}

/// The callback data of an update, when there is one.
pub(crate) fn callback_data(update: &Update) -> Option<&str> {
    update.callback_query.as_ref()?.data.as_deref()
}
