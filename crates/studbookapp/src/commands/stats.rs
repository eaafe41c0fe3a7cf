use crate::board::RecordBoard;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::RecordFilter;

/// Statistics for the records passing `filter`.
pub fn run(board: &mut RecordBoard, filter: RecordFilter) -> Result<CmdResult> {
    board.set_filter(filter);
    Ok(CmdResult::default().with_stats(board.stats().clone()))
}
