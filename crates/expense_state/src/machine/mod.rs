//! State machine module
//!
//! Contains the FSM implementation for the add-expense dialog.

mod states;
mod transitions;
mod triggers;

pub use states::DialogState;
pub use transitions::{transition, Session, StepEffect, StepResult};
pub use triggers::{DialogCommand, StepInput};
