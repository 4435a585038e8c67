//! Wire types for the slice of the Bot API the bot uses.
//!
//! Unknown fields are ignored on deserialize, so the bot keeps working
//! as Telegram grows its payloads.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method responds with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// One button per row, the layout every menu in the bot uses.
    pub fn single_column(buttons: Vec<InlineKeyboardButton>) -> Self {
        Self {
            inline_keyboard: buttons.into_iter().map(|button| vec![button]).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_with_callback_query_deserializes() {
        let raw = r#"{
            "update_id": 42,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 7, "first_name": "A"},
                "message": {"message_id": 3, "chat": {"id": 7, "type": "private"}},
                "data": "MENU::ADD"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 42);
        assert!(update.message.is_none());
        let callback = update.callback_query.unwrap();
        assert_eq!(callback.from.id, 7);
        assert_eq!(callback.data.as_deref(), Some("MENU::ADD"));
        assert_eq!(callback.message.unwrap().chat.id, 7);
    }

    #[test]
    fn plain_text_message_deserializes() {
        let raw = r#"{
            "update_id": 1,
            "message": {
                "message_id": 10,
                "chat": {"id": 5, "type": "private"},
                "from": {"id": 5, "is_bot": false},
                "text": "125,50",
                "date": 1700000000
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.text.as_deref(), Some("125,50"));
        assert_eq!(message.chat.id, 5);
    }

    #[test]
    fn keyboard_serializes_to_nested_arrays() {
        let markup = InlineKeyboardMarkup::single_column(vec![
            InlineKeyboardButton::new("Еда", "CATEGORY::Еда"),
            InlineKeyboardButton::new("Отмена", "CANCEL"),
        ]);

        let value = serde_json::to_value(&markup).unwrap();
        assert_eq!(value["inline_keyboard"][0][0]["callback_data"], "CATEGORY::Еда");
        assert_eq!(value["inline_keyboard"][1][0]["text"], "Отмена");
    }
}
