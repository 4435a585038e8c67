//! Dialog states - Defines all possible states of one user's dialog.

use serde::{Deserialize, Serialize};

/// Defines the possible states of a user's add-expense dialog.
///
/// `Idle` is both the initial and the resting state between dialogs.
/// Persisted as the uppercase strings the session table has always
/// used (`"IDLE"`, `"ASK_CATEGORY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogState {
    /// No dialog in progress.
    Idle,
    /// Waiting for a category button or a typed new category.
    AskCategory,
    /// Waiting for a store button or a typed new store.
    AskStore,
    /// Waiting for a typed amount.
    AskAmount,
    /// Waiting for a typed note or an explicit skip.
    AskNote,
    /// Waiting for the save/cancel decision.
    Confirm,
}

impl Default for DialogState {
    fn default() -> Self {
        DialogState::Idle
    }
}

impl DialogState {
    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::AskCategory => "ASK_CATEGORY",
            Self::AskStore => "ASK_STORE",
            Self::AskAmount => "ASK_AMOUNT",
            Self::AskNote => "ASK_NOTE",
            Self::Confirm => "CONFIRM",
        }
    }

    /// Parse the database representation.
    pub fn from_db(raw: &str) -> Option<Self> {
        match raw {
            "IDLE" => Some(Self::Idle),
            "ASK_CATEGORY" => Some(Self::AskCategory),
            "ASK_STORE" => Some(Self::AskStore),
            "ASK_AMOUNT" => Some(Self::AskAmount),
            "ASK_NOTE" => Some(Self::AskNote),
            "CONFIRM" => Some(Self::Confirm),
            _ => None,
        }
    }

    /// The four states where typed text can belong to the dialog.
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            Self::AskCategory | Self::AskStore | Self::AskAmount | Self::AskNote
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(DialogState::default(), DialogState::Idle);
    }

    #[test]
    fn db_representation_round_trips() {
        for state in [
            DialogState::Idle,
            DialogState::AskCategory,
            DialogState::AskStore,
            DialogState::AskAmount,
            DialogState::AskNote,
            DialogState::Confirm,
        ] {
            assert_eq!(DialogState::from_db(state.as_str()), Some(state));
        }
        assert_eq!(DialogState::from_db("ASK_WHAT"), None);
    }

    #[test]
    fn text_acceptance_excludes_idle_and_confirm() {
        assert!(DialogState::AskAmount.accepts_text());
        assert!(!DialogState::Idle.accepts_text());
        assert!(!DialogState::Confirm.accepts_text());
    }
}
