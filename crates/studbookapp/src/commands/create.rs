use crate::board::RecordBoard;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::RecordDraft;
use log::info;

pub fn run(board: &mut RecordBoard, draft: &RecordDraft) -> Result<CmdResult> {
    let record = draft.validate()?;
    info!("create: {} {} for {}", record.kind(), record.id, record.horse.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record created: {} ({})",
        record.title, record.id
    )));
    board.add_record(record.clone());
    result.affected_records.push(record);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::board;
    use crate::error::StudbookError;
    use crate::forms::{DetailsDraft, MedicationDraft};
    use crate::model::RecordKind;

    fn medication_draft() -> RecordDraft {
        let mut draft = RecordDraft::new(RecordKind::Medication);
        draft.title = Some("Bute".into());
        draft.horse_id = Some("h-bella".into());
        draft.details = DetailsDraft::Medication(MedicationDraft {
            medication_name: Some("Phenylbutazone".into()),
            dosage: Some("2g".into()),
            ..Default::default()
        });
        draft
    }

    #[test]
    fn test_creates_record_from_valid_draft() {
        let mut board = board();
        let result = run(&mut board, &medication_draft()).unwrap();

        assert_eq!(result.affected_records.len(), 1);
        let created = &result.affected_records[0];
        assert_eq!(board.get_record(&created.id), Some(created));
        assert_eq!(board.store().len(), 5);
        assert!(result.messages[0].content.starts_with("Record created: Bute"));
    }

    #[test]
    fn test_invalid_draft_is_rejected_without_touching_store() {
        let mut board = board();
        let mut draft = medication_draft();
        draft.title = None;

        match run(&mut board, &draft) {
            Err(StudbookError::Validation(err)) => assert_eq!(err.missing, vec!["title"]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(board.store().len(), 4);
    }
}
