use thiserror::Error;

pub type TelegramResult<T> = Result<T, TelegramError>;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram api rejected {method}: {description}")]
    Api { method: String, description: String },

    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),
}
