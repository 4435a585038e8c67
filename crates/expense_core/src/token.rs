//! Callback-data vocabulary.
//!
//! Every inline button carries a structured token of the form
//! `NAMESPACE::VALUE`, or the bare literal `CANCEL`. Parsing is total:
//! anything outside the vocabulary yields `None` and is treated by the
//! routing layer as "not mine", never as a silent no-op.

use std::fmt;

/// Top-level main-menu actions (`MENU::*` tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Recent,
    Sum10,
    Report,
    ExportCsv,
    Help,
    Main,
}

impl MenuAction {
    pub fn as_callback_data(&self) -> &'static str {
        match self {
            Self::Add => "MENU::ADD",
            Self::Recent => "MENU::RECENT",
            Self::Sum10 => "MENU::SUM10",
            Self::Report => "MENU::REPORT",
            Self::ExportCsv => "MENU::CSV",
            Self::Help => "MENU::HELP",
            Self::Main => "MENU::MAIN",
        }
    }

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "ADD" => Some(Self::Add),
            "RECENT" => Some(Self::Recent),
            "SUM10" => Some(Self::Sum10),
            "REPORT" => Some(Self::Report),
            "CSV" => Some(Self::ExportCsv),
            "HELP" => Some(Self::Help),
            "MAIN" => Some(Self::Main),
            _ => None,
        }
    }
}

/// A category pick: an existing name or a request to type a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    Pick(String),
    New,
}

/// A store pick: an existing name or a request to type a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    Pick(String),
    New,
}

/// Confirm-step decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Save,
    Cancel,
}

/// A parsed callback token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    Menu(MenuAction),
    Category(CategoryChoice),
    Store(StoreChoice),
    NoteSkip,
    Confirm(ConfirmAction),
    /// The bare `CANCEL` token, valid from any dialog step.
    Cancel,
}

impl CallbackToken {
    /// Parse raw callback data. Unknown namespaces or values yield `None`.
    pub fn parse(data: &str) -> Option<Self> {
        if data == "CANCEL" {
            return Some(Self::Cancel);
        }
        let (namespace, value) = data.split_once("::")?;
        match namespace {
            "MENU" => MenuAction::from_value(value).map(Self::Menu),
            "CATEGORY" => Some(Self::Category(if value == "NEW" {
                CategoryChoice::New
            } else {
                CategoryChoice::Pick(value.to_string())
            })),
            "STORE" => Some(Self::Store(if value == "NEW" {
                StoreChoice::New
            } else {
                StoreChoice::Pick(value.to_string())
            })),
            "NOTE" => (value == "SKIP").then_some(Self::NoteSkip),
            "CONFIRM" => match value {
                "SAVE" => Some(Self::Confirm(ConfirmAction::Save)),
                "CANCEL" => Some(Self::Confirm(ConfirmAction::Cancel)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu(action) => f.write_str(action.as_callback_data()),
            Self::Category(CategoryChoice::Pick(name)) => write!(f, "CATEGORY::{name}"),
            Self::Category(CategoryChoice::New) => f.write_str("CATEGORY::NEW"),
            Self::Store(StoreChoice::Pick(name)) => write!(f, "STORE::{name}"),
            Self::Store(StoreChoice::New) => f.write_str("STORE::NEW"),
            Self::NoteSkip => f.write_str("NOTE::SKIP"),
            Self::Confirm(ConfirmAction::Save) => f.write_str("CONFIRM::SAVE"),
            Self::Confirm(ConfirmAction::Cancel) => f.write_str("CONFIRM::CANCEL"),
            Self::Cancel => f.write_str("CANCEL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_cancel() {
        assert_eq!(CallbackToken::parse("CANCEL"), Some(CallbackToken::Cancel));
    }

    #[test]
    fn parses_category_pick_and_new() {
        assert_eq!(
            CallbackToken::parse("CATEGORY::Еда"),
            Some(CallbackToken::Category(CategoryChoice::Pick("Еда".into())))
        );
        assert_eq!(
            CallbackToken::parse("CATEGORY::NEW"),
            Some(CallbackToken::Category(CategoryChoice::New))
        );
    }

    #[test]
    fn parses_menu_actions() {
        assert_eq!(
            CallbackToken::parse("MENU::ADD"),
            Some(CallbackToken::Menu(MenuAction::Add))
        );
        assert_eq!(CallbackToken::parse("MENU::NOPE"), None);
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert_eq!(CallbackToken::parse(""), None);
        assert_eq!(CallbackToken::parse("CATEGORY"), None);
        assert_eq!(CallbackToken::parse("NOTE::LATER"), None);
        assert_eq!(CallbackToken::parse("WHATEVER::X"), None);
    }

    #[test]
    fn display_round_trips() {
        for raw in [
            "MENU::REPORT",
            "CATEGORY::Ozon",
            "STORE::NEW",
            "NOTE::SKIP",
            "CONFIRM::SAVE",
            "CANCEL",
        ] {
            let token = CallbackToken::parse(raw).expect(raw);
            assert_eq!(token.to_string(), raw);
        }
    }
}
