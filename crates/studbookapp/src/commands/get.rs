use crate::board::RecordBoard;
use crate::commands::{CmdMessage, CmdResult, ListQuery};
use crate::error::{Result, StudbookError};
use crate::sort::sort_records;

pub fn show(board: &RecordBoard, id: &str) -> Result<CmdResult> {
    let record = board
        .get_record(id)
        .cloned()
        .ok_or_else(|| StudbookError::RecordNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_records(vec![record]))
}

/// Apply `query` to the board and list what passes.
///
/// The query's filter becomes the board's active filter, so the result also
/// carries statistics for exactly the listed records.
pub fn list(board: &mut RecordBoard, query: &ListQuery) -> Result<CmdResult> {
    board.set_filter(query.filter.clone());

    let mut records = board.filtered().to_vec();
    if let Some(key) = query.sort {
        sort_records(&mut records, key);
    }

    let mut result = CmdResult::default()
        .with_listed_records(records)
        .with_stats(board.stats().clone());
    if result.listed_records.is_empty() {
        result.add_message(CmdMessage::info("No records found."));
    }
    Ok(result)
}

pub fn by_horse(board: &RecordBoard, horse_id: &str) -> Result<CmdResult> {
    let records = board.records_by_horse(horse_id);
    let mut result = CmdResult::default().with_listed_records(records);
    if result.listed_records.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No records for horse {}.",
            horse_id
        )));
    }
    Ok(result)
}
