//! Participant response reconciliation and CSV export.
//!
//! Stored `responses` maps carry two historical key conventions: the
//! current write path keys values by field `id`, but an earlier one used
//! the field `label`. Neither convention can be assumed for any given
//! record, so every read goes through [`resolve_value`] -- the single
//! choke point for both the admin participant table and the CSV export.
//! Nothing outside this module may index a response map by a fixed key.

use serde_json::Value;

use crate::forms::{FormField, ResponseMap};
use crate::types::Timestamp;

/// Leading columns that precede the dynamic form columns in every view.
const FIXED_COLUMN_LABELS: [&str; 2] = ["S.No", "Registration Date"];

/// One display column of the participant table / CSV.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Column {
    pub label: String,
}

/// Build the ordered column model: the two fixed leading columns, then one
/// column per form field in definition order.
pub fn build_columns(fields: &[FormField]) -> Vec<Column> {
    FIXED_COLUMN_LABELS
        .iter()
        .map(|label| Column {
            label: (*label).to_string(),
        })
        .chain(fields.iter().map(|f| Column {
            label: f.label.clone(),
        }))
        .collect()
}

/// Look up a participant's answer for a field, tolerating both key
/// conventions.
///
/// The label key is checked first (normative: label takes precedence when
/// both keys are present), then the field id. A JSON `null` under either
/// key counts as absent and falls through.
///
/// The label path exists purely as a migration shim for records written
/// before ids became the canonical key; new readers must still call this
/// rather than indexing by id directly until those records are migrated.
pub fn resolve_value<'a>(responses: &'a ResponseMap, field: &FormField) -> Option<&'a Value> {
    let by_label = responses.get(&field.label).filter(|v| !v.is_null());
    if by_label.is_some() {
        return by_label;
    }
    if field.id.is_empty() {
        return None;
    }
    responses.get(&field.id).filter(|v| !v.is_null())
}

/// Response keys that match neither a field label nor a field id.
///
/// This is the renamed-label gap: a record keyed by an old label becomes
/// unreachable once the admin edits that label. The values are not
/// silently recovered; callers log the orphaned keys so the gap is
/// visible instead of masked.
pub fn unmatched_keys(fields: &[FormField], responses: &ResponseMap) -> Vec<String> {
    responses
        .keys()
        .filter(|key| {
            !fields
                .iter()
                .any(|f| f.label == **key || (!f.id.is_empty() && f.id == **key))
        })
        .cloned()
        .collect()
}

/// Render a resolved value for the interactive table.
///
/// Booleans become `Yes`/`No`; absent, null, or empty values render as the
/// muted placeholder `-`; everything else is its natural string form.
pub fn format_for_display(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) | Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Render a resolved value for CSV export.
///
/// Same boolean mapping as display, but absent values become the empty
/// string rather than a placeholder glyph.
pub fn format_for_export(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Registration timestamp in en-US locale long form, e.g.
/// `1/1/2024, 10:00:00 AM`. Fixed format keeps exports deterministic.
pub fn format_registration_timestamp(ts: Timestamp) -> String {
    ts.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// A participant row as the exporter sees it: when it was created and the
/// raw response map.
#[derive(Debug)]
pub struct ExportRecord<'a> {
    pub created_at: Timestamp,
    pub responses: &'a ResponseMap,
}

/// Render the participant list as CSV.
///
/// Header row is `S.No,Registration Date` followed by the field labels,
/// joined unquoted; each data row is the 1-based index, the registration
/// timestamp, then one cell per field resolved through [`resolve_value`].
/// Every data cell is double-quoted with internal quotes doubled; records
/// are joined by `\n`.
pub fn render_csv(fields: &[FormField], records: &[ExportRecord<'_>]) -> String {
    let header = build_columns(fields)
        .into_iter()
        .map(|c| c.label)
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header);

    for (index, record) in records.iter().enumerate() {
        let mut row = Vec::with_capacity(fields.len() + 2);
        row.push(csv_cell(&(index + 1).to_string()));
        row.push(csv_cell(&format_registration_timestamp(record.created_at)));
        for field in fields {
            let value = resolve_value(record.responses, field);
            row.push(csv_cell(&format_for_export(value)));
        }
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Download filename for an export: `{title}-participants.csv`, falling
/// back to `event` when the title is empty.
pub fn export_file_name(title: &str) -> String {
    let stem = if title.is_empty() { "event" } else { title };
    format!("{stem}-participants.csv")
}

/// Quote a cell, doubling any embedded double quotes.
fn csv_cell(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldType;
    use chrono::TimeZone;
    use serde_json::json;

    fn field(id: &str, label: &str) -> FormField {
        FormField {
            id: id.into(),
            label: label.into(),
            field_type: FieldType::Text,
            required: false,
            options: None,
        }
    }

    fn checkbox(id: &str, label: &str) -> FormField {
        FormField {
            field_type: FieldType::Checkbox,
            ..field(id, label)
        }
    }

    fn map(value: serde_json::Value) -> ResponseMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn columns_keep_definition_order_behind_fixed_pair() {
        let fields = vec![field("f1", "Name"), field("f2", "College")];
        let columns = build_columns(&fields);
        let labels: Vec<_> = columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["S.No", "Registration Date", "Name", "College"]);
    }

    #[test]
    fn resolve_prefers_label_over_id() {
        let f = field("f1", "Name");
        let responses = map(json!({ "Name": "by label", "f1": "by id" }));
        assert_eq!(
            resolve_value(&responses, &f),
            Some(&json!("by label")),
            "label key must win when both conventions are present"
        );
    }

    #[test]
    fn resolve_falls_back_to_id() {
        let f = field("f1", "Name");
        let responses = map(json!({ "f1": "by id" }));
        assert_eq!(resolve_value(&responses, &f), Some(&json!("by id")));
    }

    #[test]
    fn resolve_treats_null_label_entry_as_absent() {
        let f = field("f1", "Name");
        let responses = map(json!({ "Name": null, "f1": "by id" }));
        assert_eq!(resolve_value(&responses, &f), Some(&json!("by id")));
    }

    #[test]
    fn resolve_returns_none_when_neither_key_present() {
        let f = field("f1", "Name");
        let responses = map(json!({ "other": "x" }));
        assert_eq!(resolve_value(&responses, &f), None);
    }

    #[test]
    fn absent_values_render_as_dash_and_empty() {
        assert_eq!(format_for_display(None), "-");
        assert_eq!(format_for_display(Some(&json!(null))), "-");
        assert_eq!(format_for_display(Some(&json!(""))), "-");
        assert_eq!(format_for_export(None), "");
        assert_eq!(format_for_export(Some(&json!(null))), "");
        assert_eq!(format_for_export(Some(&json!(""))), "");
    }

    #[test]
    fn booleans_render_as_yes_no() {
        assert_eq!(format_for_display(Some(&json!(true))), "Yes");
        assert_eq!(format_for_display(Some(&json!(false))), "No");
        assert_eq!(format_for_export(Some(&json!(true))), "Yes");
        assert_eq!(format_for_export(Some(&json!(false))), "No");
    }

    #[test]
    fn csv_round_trip_example() {
        let fields = vec![field("f1", "T-Shirt Size")];
        let responses = map(json!({ "f1": "L" }));
        let records = vec![ExportRecord {
            created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            responses: &responses,
        }];

        let csv = render_csv(&fields, &records);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("S.No,Registration Date,T-Shirt Size"));
        assert_eq!(lines.next(), Some(r#""1","1/1/2024, 10:00:00 AM","L""#));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_header_row_is_unquoted() {
        let fields = vec![field("f1", "Name"), field("f2", "College")];
        let csv = render_csv(&fields, &[]);
        assert_eq!(csv, "S.No,Registration Date,Name,College");
    }

    #[test]
    fn csv_escapes_embedded_quotes_and_commas() {
        let fields = vec![field("f1", "Quote")];
        let responses = map(json!({ "f1": r#"she said "hi", twice"# }));
        let records = vec![ExportRecord {
            created_at: chrono::Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap(),
            responses: &responses,
        }];

        let csv = render_csv(&fields, &records);
        assert!(csv.contains(r#""she said ""hi"", twice""#));
    }

    #[test]
    fn csv_export_is_idempotent() {
        let fields = vec![field("f1", "Name"), checkbox("f2", "Attending")];
        let responses = map(json!({ "Name": "Ada", "f2": true }));
        let records = vec![ExportRecord {
            created_at: chrono::Utc.with_ymd_and_hms(2025, 3, 9, 18, 5, 7).unwrap(),
            responses: &responses,
        }];

        let first = render_csv(&fields, &records);
        let second = render_csv(&fields, &records);
        assert_eq!(first, second, "unchanged input must produce identical bytes");
    }

    #[test]
    fn unmatched_keys_flags_orphaned_label() {
        // Field relabeled "Name" -> "Full Name" after a label-keyed record
        // was written; the old key is now unreachable and must be flagged.
        let fields = vec![field("f1", "Full Name")];
        let responses = map(json!({ "Name": "Ada" }));
        assert_eq!(unmatched_keys(&fields, &responses), vec!["Name"]);
    }

    #[test]
    fn unmatched_keys_empty_for_both_conventions() {
        let fields = vec![field("f1", "Name")];
        assert!(unmatched_keys(&fields, &map(json!({ "Name": "x" }))).is_empty());
        assert!(unmatched_keys(&fields, &map(json!({ "f1": "x" }))).is_empty());
    }

    #[test]
    fn export_file_name_falls_back_to_event() {
        assert_eq!(export_file_name("HackNight 2025"), "HackNight 2025-participants.csv");
        assert_eq!(export_file_name(""), "event-participants.csv");
    }
}
