use crate::board::RecordBoard;
use crate::commands::{not_found_warning, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{RecordPatch, RecordStatus};
use log::info;

pub fn run(board: &mut RecordBoard, id: &str, patch: RecordPatch) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update"));
        return Ok(result);
    }

    let details_kind = patch.details.as_ref().map(|d| d.kind());
    if !board.update_record(id, patch) {
        result.add_message(not_found_warning(id));
        return Ok(result);
    }

    if let Some(record) = board.get_record(id).cloned() {
        info!("update: {}", record.id);
        if details_kind.is_some_and(|kind| kind != record.kind()) {
            result.add_message(CmdMessage::warning(format!(
                "Kept {} details: a record's type cannot change",
                record.kind()
            )));
        }
        result.add_message(CmdMessage::success(format!(
            "Record updated: {}",
            record.title
        )));
        result.affected_records.push(record);
    }
    Ok(result)
}

/// Mark a record completed as of the board's today.
pub fn complete(board: &mut RecordBoard, id: &str) -> Result<CmdResult> {
    let today = board.today();
    let patch = RecordPatch::new()
        .with_status(RecordStatus::Completed)
        .with_completed_date(Some(today));

    let mut result = CmdResult::default();
    if !board.update_record(id, patch) {
        result.add_message(not_found_warning(id));
        return Ok(result);
    }
    if let Some(record) = board.get_record(id).cloned() {
        info!("complete: {}", record.id);
        result.add_message(CmdMessage::success(format!(
            "Record completed: {}",
            record.title
        )));
        result.affected_records.push(record);
    }
    Ok(result)
}
