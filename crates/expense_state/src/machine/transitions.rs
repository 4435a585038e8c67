//! State transitions - FSM transition logic
//!
//! `transition` is a pure function over `(state, draft, input)`. It
//! never touches storage or the network; every outcome is expressed as
//! a [`StepEffect`] for the engine handler to act on. Recognized inputs
//! that do not apply to the current state come back as
//! [`StepEffect::Stale`], which lets a repeated or out-of-order button
//! press fall through to the catch-all handler instead of mutating the
//! dialog twice.

use expense_core::parse_amount;
use expense_core::token::{CategoryChoice, ConfirmAction, StoreChoice};
use rust_decimal::Decimal;

use crate::draft::{ExpenseDraft, TextField};

use super::states::DialogState;
use super::triggers::{DialogCommand, StepInput};

/// One user's persisted `(state, payload)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: DialogState,
    pub draft: ExpenseDraft,
}

impl Session {
    /// The resting state between dialogs; also what a missing session
    /// row reads as.
    pub fn idle() -> Self {
        Session::default()
    }

    /// Entry point of a fresh dialog, written by the menu handler when
    /// the user picks "add".
    pub fn start_dialog() -> Self {
        Session {
            state: DialogState::AskCategory,
            draft: ExpenseDraft::default(),
        }
    }
}

/// What the engine must do after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEffect {
    /// Ask the user to type a new category name.
    PromptCategoryText,
    /// Ask the user to type a new store name.
    PromptStoreText,
    /// Show the store keyboard.
    PromptStoreChoice,
    /// Ask for the amount.
    PromptAmount,
    /// Ask for the note (with a skip button).
    PromptNote,
    /// Show the confirmation summary.
    PromptConfirm,
    /// Typed category was empty after trimming; re-prompt, no transition.
    RejectEmptyCategory,
    /// Typed store was empty after trimming; re-prompt, no transition.
    RejectEmptyStore,
    /// Amount did not parse to a positive number; re-prompt, no transition.
    RejectAmount,
    /// All fields present: insert this record and announce success.
    Save {
        category: String,
        store: String,
        amount: Decimal,
        note: String,
    },
    /// Confirm was reached with a required field missing. Unreachable
    /// through the machine itself; the transition checks rather than
    /// assumes. No record is written.
    MissingData,
    /// Dialog cancelled; payload discarded.
    Cancelled,
    /// Recognized input that does not apply to the current state.
    Stale,
}

/// Result of applying one input to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub session: Session,
    pub effect: StepEffect,
}

/// Apply one dialog input to a session.
pub fn transition(session: Session, input: StepInput<'_>) -> StepResult {
    match input {
        StepInput::Command(command) => apply_command(session, command),
        StepInput::Text(text) => apply_text(session, text),
    }
}

fn apply_command(session: Session, command: DialogCommand) -> StepResult {
    use DialogState::*;

    match (session.state, command) {
        // Cancel short-circuits from any state and discards the draft.
        (_, DialogCommand::Cancel) => StepResult {
            session: Session::idle(),
            effect: StepEffect::Cancelled,
        },

        (AskCategory, DialogCommand::Category(CategoryChoice::New)) => {
            let mut draft = session.draft;
            draft.expect_text = Some(TextField::Category);
            StepResult {
                session: Session {
                    state: AskCategory,
                    draft,
                },
                effect: StepEffect::PromptCategoryText,
            }
        }
        (AskCategory, DialogCommand::Category(CategoryChoice::Pick(name))) => {
            category_chosen(session.draft, name)
        }

        (AskStore, DialogCommand::Store(StoreChoice::New)) => {
            let mut draft = session.draft;
            draft.expect_text = Some(TextField::Store);
            StepResult {
                session: Session {
                    state: AskStore,
                    draft,
                },
                effect: StepEffect::PromptStoreText,
            }
        }
        (AskStore, DialogCommand::Store(StoreChoice::Pick(name))) => {
            store_chosen(session.draft, name)
        }

        (AskNote, DialogCommand::NoteSkip) => note_entered(session.draft, String::new()),

        (Confirm, DialogCommand::Confirm(ConfirmAction::Save)) => {
            let draft = session.draft;
            match (draft.category, draft.store, draft.amount) {
                (Some(category), Some(store), Some(amount)) => StepResult {
                    session: Session::idle(),
                    effect: StepEffect::Save {
                        category,
                        store,
                        amount,
                        note: draft.note.unwrap_or_default(),
                    },
                },
                _ => StepResult {
                    session: Session::idle(),
                    effect: StepEffect::MissingData,
                },
            }
        }
        (Confirm, DialogCommand::Confirm(ConfirmAction::Cancel)) => StepResult {
            session: Session::idle(),
            effect: StepEffect::Cancelled,
        },

        // Anything else is a recognized command aimed at a step that is
        // no longer (or not yet) active.
        _ => StepResult {
            session,
            effect: StepEffect::Stale,
        },
    }
}

fn apply_text(session: Session, text: &str) -> StepResult {
    use DialogState::*;

    match (session.state, session.draft.expect_text) {
        (AskCategory, Some(TextField::Category)) => {
            let name = text.trim();
            if name.is_empty() {
                StepResult {
                    session,
                    effect: StepEffect::RejectEmptyCategory,
                }
            } else {
                category_chosen(session.draft, name.to_string())
            }
        }
        (AskStore, Some(TextField::Store)) => {
            let name = text.trim();
            if name.is_empty() {
                StepResult {
                    session,
                    effect: StepEffect::RejectEmptyStore,
                }
            } else {
                store_chosen(session.draft, name.to_string())
            }
        }
        (AskAmount, Some(TextField::Amount)) => match parse_amount(text) {
            Some(amount) => {
                let mut draft = session.draft;
                draft.amount = Some(amount);
                draft.expect_text = Some(TextField::Note);
                StepResult {
                    session: Session {
                        state: AskNote,
                        draft,
                    },
                    effect: StepEffect::PromptNote,
                }
            }
            None => StepResult {
                session,
                effect: StepEffect::RejectAmount,
            },
        },
        (AskNote, Some(TextField::Note)) => {
            note_entered(session.draft, text.trim().to_string())
        }
        // Text arriving while no text is expected here.
        _ => StepResult {
            session,
            effect: StepEffect::Stale,
        },
    }
}

fn category_chosen(mut draft: ExpenseDraft, name: String) -> StepResult {
    draft.category = Some(name.trim().to_string());
    draft.expect_text = None;
    StepResult {
        session: Session {
            state: DialogState::AskStore,
            draft,
        },
        effect: StepEffect::PromptStoreChoice,
    }
}

fn store_chosen(mut draft: ExpenseDraft, name: String) -> StepResult {
    draft.store = Some(name.trim().to_string());
    draft.expect_text = Some(TextField::Amount);
    StepResult {
        session: Session {
            state: DialogState::AskAmount,
            draft,
        },
        effect: StepEffect::PromptAmount,
    }
}

fn note_entered(mut draft: ExpenseDraft, note: String) -> StepResult {
    draft.note = Some(note);
    draft.expect_text = None;
    StepResult {
        session: Session {
            state: DialogState::Confirm,
            draft,
        },
        effect: StepEffect::PromptConfirm,
    }
}
