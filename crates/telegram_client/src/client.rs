//! HTTP client for the Bot API plus the trait handlers depend on.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{TelegramError, TelegramResult};
use crate::types::{ApiResponse, InlineKeyboardMarkup, Message, Update};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// The Bot API surface the bot is written against.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Long-poll for updates. Blocks up to `timeout_secs` server side.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> TelegramResult<Vec<Update>>;

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> TelegramResult<Message>;

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> TelegramResult<()>;

    /// Stops the client-side spinner on the tapped button.
    async fn answer_callback_query(&self, callback_query_id: &str) -> TelegramResult<()>;

    /// Upload `bytes` as a file attachment named `filename`.
    async fn send_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> TelegramResult<Message>;
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url(format!("{TELEGRAM_API_BASE}/bot{bot_token}"))
    }

    /// Point the client at an arbitrary base, e.g. a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: serde_json::Value,
        timeout: Duration,
    ) -> TelegramResult<T> {
        debug!("telegram call: {method}");
        let response = self
            .http
            .post(format!("{}/{method}", self.base_url))
            .timeout(timeout)
            .json(&payload)
            .send()
            .await?;
        let envelope: ApiResponse<T> = response.json().await?;
        unwrap_envelope(method, envelope)
    }
}

fn unwrap_envelope<T>(method: &str, envelope: ApiResponse<T>) -> TelegramResult<T> {
    if !envelope.ok {
        return Err(TelegramError::Api {
            method: method.to_string(),
            description: envelope
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }
    envelope
        .result
        .ok_or_else(|| TelegramError::InvalidResponse(format!("{method}: ok without result")))
}

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
impl BotApi for TelegramClient {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> TelegramResult<Vec<Update>> {
        let mut payload = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        // The HTTP timeout must outlast the server-side long poll.
        let timeout = Duration::from_secs(timeout_secs + 10);
        self.call("getUpdates", payload, timeout).await
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> TelegramResult<Message> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });
        if let Some(keyboard) = keyboard {
            payload["reply_markup"] = serde_json::to_value(keyboard)
                .map_err(|error| TelegramError::InvalidResponse(error.to_string()))?;
        }
        self.call("sendMessage", payload, CALL_TIMEOUT).await
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> TelegramResult<()> {
        let payload = json!({
            "chat_id": chat_id,
            "message_id": message_id,
        });
        self.call::<bool>("deleteMessage", payload, CALL_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> TelegramResult<()> {
        let payload = json!({ "callback_query_id": callback_query_id });
        self.call::<bool>("answerCallbackQuery", payload, CALL_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> TelegramResult<Message> {
        debug!("telegram call: sendDocument ({} bytes)", bytes.len());
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")?;
        let form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);

        let response = self
            .http
            .post(format!("{}/sendDocument", self.base_url))
            .timeout(CALL_TIMEOUT)
            .multipart(form)
            .send()
            .await?;
        let envelope: ApiResponse<Message> = response.json().await?;
        unwrap_envelope("sendDocument", envelope)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::types::InlineKeyboardButton;

    async fn client_for(server: &MockServer) -> TelegramClient {
        TelegramClient::with_base_url(format!("{}/bot123:abc", server.uri()))
    }

    #[tokio::test]
    async fn send_message_posts_keyboard_and_parses_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(json!({
                "chat_id": 7,
                "text": "Выбери категорию",
                "parse_mode": "HTML",
                "reply_markup": {
                    "inline_keyboard": [[{"text": "Еда", "callback_data": "CATEGORY::Еда"}]]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"message_id": 55, "chat": {"id": 7}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let keyboard = InlineKeyboardMarkup::single_column(vec![InlineKeyboardButton::new(
            "Еда",
            "CATEGORY::Еда",
        )]);
        let message = client
            .send_message(7, "Выбери категорию", Some(keyboard))
            .await
            .expect("send");
        assert_eq!(message.message_id, 55);
    }

    #[tokio::test]
    async fn api_rejection_surfaces_method_and_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/deleteMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": false,
                "description": "Bad Request: message to delete not found"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let error = client.delete_message(7, 99).await.unwrap_err();
        match error {
            TelegramError::Api {
                method,
                description,
            } => {
                assert_eq!(method, "deleteMessage");
                assert!(description.contains("message to delete not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_updates_sends_offset_and_parses_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/getUpdates"))
            .and(body_partial_json(json!({"offset": 100, "timeout": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [
                    {
                        "update_id": 100,
                        "message": {
                            "message_id": 1,
                            "chat": {"id": 5},
                            "from": {"id": 5},
                            "text": "/start"
                        }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let updates = client.get_updates(Some(100), 1).await.expect("poll");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_id, 100);
        assert_eq!(
            updates[0].message.as_ref().unwrap().text.as_deref(),
            Some("/start")
        );
    }

    #[tokio::test]
    async fn answer_callback_query_accepts_bool_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/answerCallbackQuery"))
            .and(body_partial_json(json!({"callback_query_id": "cb-9"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.answer_callback_query("cb-9").await.expect("ack");
    }

    #[tokio::test]
    async fn send_document_uploads_multipart_csv() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendDocument"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"message_id": 77, "chat": {"id": 7}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let message = client
            .send_document(7, "expenses.csv", b"created_at,category\n".to_vec())
            .await
            .expect("upload");
        assert_eq!(message.message_id, 77);
    }
}
