//! Styles for the studbook CLI.
//!
//! Renderers work with semantic style names (a title, a date, a warning), never
//! with raw colors. Every style is built once through `once_cell::sync::Lazy`
//! and looked up with [`style`].
//!
//! `console` drops the escape codes by itself when stdout is not a terminal or
//! `NO_COLOR`/`CLICOLOR=0` is set, so output piped into files stays plain.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use studbookapp::api::MessageLevel;
use studbookapp::model::{Priority, RecordStatus};

/// Style identifiers shared by the renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const TITLE: &str = "title";
    pub const HEADER: &str = "header";
    pub const ID: &str = "id";
    pub const KIND: &str = "kind";
    pub const HORSE: &str = "horse";
    pub const TIME: &str = "time";
    pub const OVERDUE: &str = "overdue";
    pub const DONE: &str = "done";
    pub const URGENT: &str = "urgent";
    pub const HIGH: &str = "high";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

static THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    let regular = Style::new();
    let muted = Style::new().color256(246);
    let faint = Style::new().color256(240);

    HashMap::from([
        (names::REGULAR, regular.clone()),
        (names::MUTED, muted.clone()),
        (names::FAINT, faint.clone()),
        (names::TITLE, regular.clone().bold()),
        (names::HEADER, regular.clone().bold().underlined()),
        (names::ID, Style::new().color256(178)),
        (names::KIND, Style::new().cyan()),
        (names::HORSE, Style::new().color256(137)),
        (names::TIME, muted.clone().italic()),
        (names::OVERDUE, Style::new().red().bold()),
        (names::DONE, faint),
        (names::URGENT, Style::new().red()),
        (names::HIGH, Style::new().yellow()),
        (names::WARNING, Style::new().yellow().bold()),
        (names::SUCCESS, Style::new().green()),
        (names::INFO, muted),
    ])
});

pub fn style(name: &str) -> Style {
    THEME.get(name).cloned().unwrap_or_default()
}

pub fn message_style(level: &MessageLevel) -> Style {
    match level {
        MessageLevel::Info => style(names::INFO),
        MessageLevel::Success => style(names::SUCCESS),
        MessageLevel::Warning => style(names::WARNING),
    }
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::Urgent => style(names::URGENT),
        Priority::High => style(names::HIGH),
        Priority::Medium => style(names::REGULAR),
        Priority::Low => style(names::MUTED),
    }
}

/// Status marker shown in the first column of listings.
pub fn status_icon(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Draft => "◌",
        RecordStatus::Scheduled => "○",
        RecordStatus::InProgress => "◐",
        RecordStatus::Completed => "●",
        RecordStatus::Cancelled => "✕",
        RecordStatus::Overdue => "!",
    }
}
