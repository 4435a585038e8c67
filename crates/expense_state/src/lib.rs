//! expense_state - State machine and FSM logic for the add-expense dialog
//!
//! This crate provides the pure state machine driving one user's
//! in-progress dialog: category -> store -> amount -> note -> confirm.
//! It performs no I/O; the engine handler in `expense_bot` turns the
//! returned effects into messages and persistence.

pub mod draft;
pub mod machine;

// Re-export commonly used types
pub use draft::{ExpenseDraft, TextField};
pub use machine::{
    transition, DialogCommand, DialogState, Session, StepEffect, StepInput, StepResult,
};
