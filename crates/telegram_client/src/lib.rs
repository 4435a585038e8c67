//! telegram_client - minimal Telegram Bot API client
//!
//! Covers exactly the methods the bot needs: `getUpdates` long polling,
//! `sendMessage` with inline keyboards, `deleteMessage`,
//! `answerCallbackQuery` and `sendDocument`. The [`BotApi`] trait is the
//! seam the bot's handlers are written against, so tests can substitute
//! a recording fake for the real HTTP client.

pub mod client;
pub mod error;
pub mod types;

pub use client::{BotApi, TelegramClient};
pub use error::{TelegramError, TelegramResult};
pub use types::{
    ApiResponse, CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update,
    User,
};
