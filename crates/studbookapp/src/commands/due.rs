use crate::board::RecordBoard;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::sort::{sort_records, SortKey};

/// Open records whose due date has passed, earliest due first.
pub fn overdue(board: &RecordBoard) -> Result<CmdResult> {
    let mut records = board.overdue_records();
    sort_records(&mut records, SortKey::Due);

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::success("Nothing overdue."));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} overdue record{}",
            records.len(),
            if records.len() == 1 { "" } else { "s" }
        )));
    }
    Ok(result.with_listed_records(records))
}

/// Records scheduled between today and `days` ahead, soonest first.
/// `None` uses the board's configured window.
pub fn upcoming(board: &RecordBoard, days: Option<u32>) -> Result<CmdResult> {
    let window = days.unwrap_or(board.window_days());
    let mut records = board.upcoming_records(Some(window));
    sort_records(&mut records, SortKey::Scheduled);

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing scheduled in the next {} days.",
            window
        )));
    }
    Ok(result.with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::board;
    use crate::commands::MessageLevel;

    #[test]
    fn test_overdue_lists_open_past_due_records() {
        let board = board();
        let result = overdue(&board).unwrap();

        assert_eq!(result.listed_records.len(), 1);
        assert_eq!(result.listed_records[0].title, "Regumate");
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, "1 overdue record");
    }

    #[test]
    fn test_upcoming_uses_window() {
        let board = board();

        let week = upcoming(&board, None).unwrap();
        assert_eq!(week.listed_records.len(), 1);
        assert_eq!(week.listed_records[0].title, "Dentist");

        let fortnight = upcoming(&board, Some(14)).unwrap();
        let titles: Vec<&str> = fortnight
            .listed_records
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Dentist", "Vaccines"]);

        let none = upcoming(&board, Some(1)).unwrap();
        assert!(none.listed_records.is_empty());
        assert_eq!(none.messages[0].content, "Nothing scheduled in the next 1 days.");
    }
}
