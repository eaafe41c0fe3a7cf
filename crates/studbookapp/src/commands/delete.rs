use crate::board::RecordBoard;
use crate::commands::{not_found_warning, CmdMessage, CmdResult};
use crate::error::Result;
use log::info;

pub fn run(board: &mut RecordBoard, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(record) = board.get_record(id).cloned() else {
        result.add_message(not_found_warning(id));
        return Ok(result);
    };

    board.delete_record(id);
    info!("delete: {}", id);
    result.add_message(CmdMessage::success(format!(
        "Record deleted: {}",
        record.title
    )));
    result.affected_records.push(record);
    Ok(result)
}
