//! Record id generation.
//!
//! Ids look like `med_m7x2k9qa_3f9c1b2de`: a per-kind prefix, the creation time
//! in base 36 milliseconds, and nine random characters. Ids sort roughly by
//! creation time within a kind. Collisions are not checked.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::RecordKind;

const SUFFIX_LEN: usize = 9;

pub fn generate_record_id(kind: RecordKind, now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{}_{}_{}", kind.id_prefix(), to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
