//! # Rendering Module
//!
//! Turns a [`CmdResult`] into the text printed on stdout.
//!
//! - `--output json` serializes the whole result with `serde_json`, unchanged.
//! - `--output term` picks a layout from the [`View`] the command asked for.
//!
//! ## Table Layout
//!
//! Listings print one record per line:
//! - `icon` (2 chars): status marker
//! - `id` (24 chars): record id, the handle every other command takes
//! - `kind` (19 chars): record type label
//! - `title` (fill): truncated to fit `LINE_WIDTH`
//! - `horse` (14 chars): horse name
//! - `date` (10 chars): due date when overdue, otherwise scheduled or due date
//!
//! Widths are measured with `unicode-width`, so names with wide characters
//! still line up.

use super::setup::OutputMode;
use super::styles::{self, names};
use chrono::{DateTime, NaiveDate, Utc};
use studbookapp::api::CmdMessage;
use studbookapp::commands::CmdResult;
use studbookapp::error::Result;
use studbookapp::model::{Priority, Record, RecordKind, RecordStatus};
use studbookapp::stats::{is_overdue, RecordStats};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;

pub const COL_ICON: usize = 2;
pub const COL_ID: usize = 24;
pub const COL_KIND: usize = 19;
pub const COL_HORSE: usize = 14;
pub const COL_DATE: usize = 10;

const ELLIPSIS: char = '…';

/// Which layout a command's result wants in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Messages only (add, update, complete, delete).
    Modification,
    /// A table of `listed_records`, then messages.
    Listing,
    /// The first listed record in full.
    Detail,
    /// The statistics block.
    Stats,
}

/// What the renderer needs to know beyond the result itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub output: OutputMode,
    pub today: NaiveDate,
    pub window_days: u32,
}

pub fn render(result: &CmdResult, view: View, ctx: &RenderContext) -> Result<String> {
    if ctx.output.is_structured() {
        let mut json = serde_json::to_string_pretty(result)?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = String::new();
    match view {
        View::Modification => {}
        View::Listing => {
            for record in &result.listed_records {
                out.push_str(&render_row(record, ctx.today));
                out.push('\n');
            }
        }
        View::Detail => {
            if let Some(record) = result.listed_records.first() {
                out.push_str(&render_detail(record, ctx.today, Utc::now()));
            }
        }
        View::Stats => {
            if let Some(stats) = &result.stats {
                out.push_str(&render_stats(stats, ctx.window_days));
            }
        }
    }
    out.push_str(&render_messages(&result.messages));
    Ok(out)
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}\n", styles::message_style(&msg.level).apply_to(&msg.content)))
        .collect()
}

/// The date shown in the listing's last column, and whether it is overdue.
fn row_date(record: &Record, today: NaiveDate) -> (Option<NaiveDate>, bool) {
    if is_overdue(record, today) {
        return (record.due_date, true);
    }
    (record.scheduled_date.or(record.due_date), false)
}

pub fn render_row(record: &Record, today: NaiveDate) -> String {
    let fixed = COL_ICON + COL_ID + COL_KIND + COL_HORSE + COL_DATE + 4;
    let title_width = LINE_WIDTH.saturating_sub(fixed);
    let done = matches!(
        record.status,
        RecordStatus::Completed | RecordStatus::Cancelled
    );

    let (date, overdue) = row_date(record, today);
    let date_text = date.map(|d| d.to_string()).unwrap_or_default();
    let date_style = if overdue {
        styles::style(names::OVERDUE)
    } else {
        styles::style(names::TIME)
    };
    let title_style = if done {
        styles::style(names::DONE)
    } else {
        styles::priority_style(record.priority)
    };

    format!(
        "{} {} {} {} {} {}",
        pad(styles::status_icon(record.status), COL_ICON - 1),
        styles::style(names::ID).apply_to(pad(&record.id, COL_ID)),
        styles::style(names::KIND).apply_to(pad(record.kind().label(), COL_KIND)),
        title_style.apply_to(pad(&record.title, title_width)),
        styles::style(names::HORSE).apply_to(pad(&record.horse.name, COL_HORSE)),
        date_style.apply_to(pad(&date_text, COL_DATE)),
    )
    .trim_end()
    .to_string()
}

pub fn render_detail(record: &Record, today: NaiveDate, now: DateTime<Utc>) -> String {
    let mut fields: Vec<(&str, String)> = vec![
        ("id", record.id.clone()),
        ("type", record.kind().label().to_string()),
        (
            "horse",
            format!("{} ({})", record.horse.name, record.horse.id),
        ),
        ("status", record.status.to_string()),
        ("priority", record.priority.to_string()),
    ];
    let optional_dates = [
        ("scheduled", record.scheduled_date),
        ("due", record.due_date),
        ("completed", record.completed_date),
    ];
    for (label, date) in optional_dates {
        if let Some(date) = date {
            fields.push((label, date.to_string()));
        }
    }
    let optional_text = [
        ("vet", &record.veterinarian),
        ("assigned", &record.assigned_to),
        ("description", &record.description),
    ];
    for (label, value) in optional_text {
        if let Some(value) = value {
            fields.push((label, value.clone()));
        }
    }
    if let Some(cost) = record.estimated_cost {
        fields.push(("est. cost", format!("{:.2}", cost)));
    }
    if let Some(cost) = record.actual_cost {
        fields.push(("cost", format!("{:.2}", cost)));
    }
    if !record.tags.is_empty() {
        fields.push(("tags", record.tags.join(", ")));
    }
    let summary = record.details.summary();
    if !summary.is_empty() {
        fields.push(("details", summary));
    }
    fields.push(("created", format_time_ago(record.created_at, now)));

    let mut out = format!("{}\n", styles::style(names::TITLE).apply_to(&record.title));
    if is_overdue(record, today) {
        out.push_str(&format!("{}\n", styles::style(names::OVERDUE).apply_to("OVERDUE")));
    }
    let label_width = fields.iter().map(|(label, _)| label.width()).max().unwrap_or(0);
    for (label, value) in fields {
        out.push_str(&format!(
            "  {}  {}\n",
            styles::style(names::MUTED).apply_to(pad(label, label_width)),
            value
        ));
    }
    if let Some(notes) = &record.notes {
        out.push('\n');
        for line in notes.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

pub fn render_stats(stats: &RecordStats, window_days: u32) -> String {
    let muted = styles::style(names::MUTED);
    let header = styles::style(names::HEADER);
    let mut out = format!(
        "{} records  {} open  {} overdue  {} upcoming {}\n",
        styles::style(names::TITLE).apply_to(stats.total),
        stats.open(),
        styles::style(if stats.overdue > 0 { names::OVERDUE } else { names::REGULAR })
            .apply_to(stats.overdue),
        stats.upcoming,
        muted.apply_to(format!("(next {} days)", window_days)),
    );

    let by_type: Vec<(String, usize)> = RecordKind::ALL
        .iter()
        .map(|kind| (kind.label().to_string(), stats.count_type(*kind)))
        .collect();
    let by_status: Vec<(String, usize)> = RecordStatus::ALL
        .iter()
        .map(|status| (status.to_string(), stats.count_status(*status)))
        .collect();
    let by_priority: Vec<(String, usize)> = Priority::ALL
        .iter()
        .rev()
        .map(|priority| (priority.to_string(), stats.count_priority(*priority)))
        .collect();

    for (title, buckets) in [
        ("By type", by_type),
        ("By status", by_status),
        ("By priority", by_priority),
    ] {
        out.push_str(&format!("\n{}\n", header.apply_to(title)));
        for (label, count) in buckets {
            let line = format!("  {} {:>5}", pad(&label, COL_KIND), count);
            if count == 0 {
                out.push_str(&format!("{}\n", styles::style(names::FAINT).apply_to(line)));
            } else {
                out.push_str(&format!("{}\n", line));
            }
        }
    }
    out
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now
        .signed_duration_since(timestamp)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO);
    format!(
        "{} ({})",
        timeago::Formatter::new().convert(elapsed),
        timestamp.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Truncates `text` to at most `width` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let limit = width.saturating_sub(ELLIPSIS.width().unwrap_or(1));
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push(ELLIPSIS);
    }
    out
}

/// Truncates or right-pads `text` to exactly `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fitted = truncate_to_width(text, width);
    let used = fitted.width();
    format!("{}{}", fitted, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use studbookapp::api::MessageLevel;
    use studbookapp::model::{HorseRef, MedicationDetails, RecordDetails};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn record() -> Record {
        Record::new_at(
            "Regumate",
            HorseRef::new("h-bella", "Bella"),
            RecordDetails::Medication(MedicationDetails {
                medication_name: "Altrenogest".into(),
                dosage: "10ml".into(),
                ..Default::default()
            }),
            Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap(),
        )
    }

    fn ctx(output: OutputMode) -> RenderContext {
        RenderContext {
            output,
            today: today(),
            window_days: 7,
        }
    }

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate_to_width("Bella", 10), "Bella");
        assert_eq!(truncate_to_width("Bellamy's Dream", 8), "Bellamy…");
        // each CJK char is two columns wide
        assert_eq!(truncate_to_width("馬馬馬馬", 5), "馬馬…");
        assert_eq!(pad("ab", 4), "ab  ");
    }

    #[test]
    fn test_row_shows_due_date_when_overdue() {
        plain();
        let overdue = record().with_due_date(NaiveDate::from_ymd_opt(2026, 6, 14).unwrap());
        let row = render_row(&overdue, today());
        assert!(row.contains("Regumate"));
        assert!(row.contains("Medication"));
        assert!(row.contains("Bella"));
        assert!(row.ends_with("2026-06-14"));
        assert!(row.width() <= LINE_WIDTH);
    }

    #[test]
    fn test_row_prefers_scheduled_date() {
        plain();
        let scheduled = record()
            .with_scheduled_date(NaiveDate::from_ymd_opt(2026, 6, 20).unwrap())
            .with_due_date(NaiveDate::from_ymd_opt(2026, 6, 25).unwrap());
        assert!(render_row(&scheduled, today()).ends_with("2026-06-20"));
    }

    #[test]
    fn test_detail_lists_present_fields_only() {
        plain();
        let record = record().with_veterinarian("Dr. Hale").with_tags(["daily"]);
        let now = Utc.with_ymd_and_hms(2026, 6, 4, 8, 0, 0).unwrap();
        let out = render_detail(&record, today(), now);

        assert!(out.starts_with("Regumate\n"));
        assert!(out.contains("Dr. Hale"));
        assert!(out.contains("Altrenogest 10ml"));
        assert!(out.contains("daily"));
        assert!(out.contains("3 days ago"));
        assert!(!out.contains("completed"));
        assert!(!out.contains("OVERDUE"));
    }

    #[test]
    fn test_stats_block_lists_every_bucket() {
        plain();
        let records = vec![record()];
        let stats = RecordStats::compute(&records, today(), 7);
        let out = render_stats(&stats, 7);

        assert!(out.starts_with("1 records  1 open  0 overdue  0 upcoming (next 7 days)"));
        assert!(out.contains("Heat Cycle"));
        assert!(out.contains("in_progress"));
        assert!(out.contains("urgent"));
    }

    #[test]
    fn test_json_output_is_the_raw_result() {
        let mut result = CmdResult::default().with_listed_records(vec![record()]);
        result.add_message(CmdMessage::info("hello"));

        let out = render(&result, View::Listing, &ctx(OutputMode::Json)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["listed_records"][0]["title"], "Regumate");
        assert_eq!(value["listed_records"][0]["details"]["type"], "medication");
        assert_eq!(value["messages"][0]["level"], "info");
    }

    #[test]
    fn test_term_modification_prints_messages() {
        plain();
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Record deleted: Regumate"));
        let out = render(&result, View::Modification, &ctx(OutputMode::Term)).unwrap();
        assert_eq!(out, "Record deleted: Regumate\n");
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }
}
