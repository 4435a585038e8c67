//! expense_bot - the Telegram expense tracker application
//!
//! Wires the dialog state machine, the SQLite stores and the Telegram
//! client into a handler chain behind a long-polling loop. Everything
//! user facing lives in `handlers/`; `dispatcher` routes updates,
//! `poller` drives the cursor.

pub mod dispatcher;
pub mod handlers;
pub mod keyboards;
pub mod poller;
pub mod vocab;
