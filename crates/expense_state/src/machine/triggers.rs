//! Dialog triggers - the inputs that drive state transitions.

use expense_core::token::{CallbackToken, CategoryChoice, ConfirmAction, StoreChoice};

/// A callback-button command addressed to the dialog.
///
/// This is the subset of [`CallbackToken`] the state machine consumes;
/// menu tokens stay outside the dialog and never reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogCommand {
    Category(CategoryChoice),
    Store(StoreChoice),
    NoteSkip,
    Confirm(ConfirmAction),
    Cancel,
}

impl DialogCommand {
    /// Narrow a parsed token to a dialog command, if it is one.
    pub fn from_token(token: &CallbackToken) -> Option<Self> {
        match token {
            CallbackToken::Category(choice) => Some(Self::Category(choice.clone())),
            CallbackToken::Store(choice) => Some(Self::Store(choice.clone())),
            CallbackToken::NoteSkip => Some(Self::NoteSkip),
            CallbackToken::Confirm(action) => Some(Self::Confirm(*action)),
            CallbackToken::Cancel => Some(Self::Cancel),
            CallbackToken::Menu(_) => None,
        }
    }
}

/// One inbound dialog input: a button press or a typed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput<'a> {
    Command(DialogCommand),
    Text(&'a str),
}
