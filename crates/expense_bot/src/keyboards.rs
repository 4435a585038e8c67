//! Inline keyboard layouts shared by the handlers.

use expense_core::{CallbackToken, CategoryChoice, ConfirmAction, MenuAction, StoreChoice};
use telegram_client::{InlineKeyboardButton, InlineKeyboardMarkup};

fn button(text: &str, token: CallbackToken) -> InlineKeyboardButton {
    InlineKeyboardButton::new(text, token.to_string())
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![
                button("➕ Добавить", CallbackToken::Menu(MenuAction::Add)),
                button("🕘 Последние", CallbackToken::Menu(MenuAction::Recent)),
            ],
            vec![
                button("🔟 Сумма 10", CallbackToken::Menu(MenuAction::Sum10)),
                button("📅 Отчёт (месяц)", CallbackToken::Menu(MenuAction::Report)),
            ],
            vec![
                button("📄 CSV", CallbackToken::Menu(MenuAction::ExportCsv)),
                button("ℹ️ Справка", CallbackToken::Menu(MenuAction::Help)),
            ],
        ],
    }
}

pub fn back_to_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![button(
        "🏠 В главное меню",
        CallbackToken::Menu(MenuAction::Main),
    )])
}

pub fn categories(names: &[String]) -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = names
        .iter()
        .map(|name| {
            button(
                name,
                CallbackToken::Category(CategoryChoice::Pick(name.clone())),
            )
        })
        .collect();
    buttons.push(button(
        "➕ Новая категория",
        CallbackToken::Category(CategoryChoice::New),
    ));
    buttons.push(cancel_button());
    InlineKeyboardMarkup::single_column(buttons)
}

pub fn stores(names: &[String]) -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = names
        .iter()
        .map(|name| button(name, CallbackToken::Store(StoreChoice::Pick(name.clone()))))
        .collect();
    buttons.push(button(
        "➕ Новый магазин",
        CallbackToken::Store(StoreChoice::New),
    ));
    buttons.push(cancel_button());
    InlineKeyboardMarkup::single_column(buttons)
}

pub fn cancel_only() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![cancel_button()])
}

pub fn note() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![
        button("Пропустить заметку", CallbackToken::NoteSkip),
        cancel_button(),
    ])
}

pub fn confirm() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![
        button("💾 Сохранить", CallbackToken::Confirm(ConfirmAction::Save)),
        button("❌ Отмена", CallbackToken::Confirm(ConfirmAction::Cancel)),
    ])
}

pub fn after_save() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![
        button("➕ Добавить ещё расход", CallbackToken::Menu(MenuAction::Add)),
        button("🏠 В главное меню", CallbackToken::Menu(MenuAction::Main)),
    ])
}

fn cancel_button() -> InlineKeyboardButton {
    button("❌ Отмена", CallbackToken::Cancel)
}
