//! Dynamic registration form schema and response validation.
//!
//! Each event carries an ordered list of [`FormField`] definitions in its
//! `form_fields` JSONB column. Field `id`s are UUID strings assigned
//! server-side when a field first appears and preserved across edits;
//! `label`s are administrator-editable display text with no uniqueness
//! guarantee over time.
//!
//! Submitted responses are a flat map from field key to value. The current
//! write path keys responses by field `id`; legacy records may be keyed by
//! `label` instead (see [`crate::reconcile`] for the read-side handling).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// A participant's submitted responses: field key -> value.
pub type ResponseMap = serde_json::Map<String, serde_json::Value>;

/// Input types the form renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Textarea,
    Checkbox,
    Select,
}

/// One administrator-defined form field, ordered within its event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    /// Stable key, generated at creation. Empty on fields that have not
    /// been through [`assign_field_ids`] yet.
    #[serde(default)]
    pub id: String,
    /// Display text. Editable, so not a reliable lookup key over time.
    pub label: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields; ignored for other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Assign a fresh UUID to every field that arrived without one.
///
/// Ids already present are preserved so existing responses stay reachable
/// when an admin edits the schema.
pub fn assign_field_ids(fields: &mut [FormField]) {
    for field in fields.iter_mut() {
        if field.id.is_empty() {
            field.id = Uuid::new_v4().to_string();
        }
    }
}

/// Validate a submission against the event's field schema.
///
/// Responses must be keyed by field `id`. Rejects unknown keys, missing or
/// empty required fields, and values whose JSON type does not match the
/// field type (`checkbox` wants a boolean, everything else a string or
/// null).
pub fn validate_responses(fields: &[FormField], responses: &ResponseMap) -> Result<(), CoreError> {
    for key in responses.keys() {
        if !fields.iter().any(|f| f.id == *key) {
            return Err(CoreError::Validation(format!(
                "Unknown form field key: {key}"
            )));
        }
    }

    for field in fields {
        let value = responses.get(&field.id);

        if field.required && !has_answer(value) {
            return Err(CoreError::Validation(format!(
                "Field '{}' is required",
                field.label
            )));
        }

        let Some(value) = value else { continue };
        if value.is_null() {
            continue;
        }

        let type_ok = match field.field_type {
            FieldType::Checkbox => value.is_boolean(),
            _ => value.is_string(),
        };
        if !type_ok {
            return Err(CoreError::Validation(format!(
                "Field '{}' has an invalid value type",
                field.label
            )));
        }

        // A selected option must be one of the configured choices.
        if field.field_type == FieldType::Select {
            if let (Some(options), Some(chosen)) = (&field.options, value.as_str()) {
                if !chosen.is_empty() && !options.iter().any(|o| o == chosen) {
                    return Err(CoreError::Validation(format!(
                        "Field '{}' has an unknown option: {chosen}",
                        field.label
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Whether a value counts as an answer: present, non-null, and for strings
/// non-empty. `false` is a valid checkbox answer.
fn has_answer(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Vec<FormField> {
        vec![
            FormField {
                id: "f1".into(),
                label: "Full Name".into(),
                field_type: FieldType::Text,
                required: true,
                options: None,
            },
            FormField {
                id: "f2".into(),
                label: "Bringing a laptop?".into(),
                field_type: FieldType::Checkbox,
                required: false,
                options: None,
            },
            FormField {
                id: "f3".into(),
                label: "T-Shirt Size".into(),
                field_type: FieldType::Select,
                required: false,
                options: Some(vec!["S".into(), "M".into(), "L".into()]),
            },
        ]
    }

    fn responses(value: serde_json::Value) -> ResponseMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn valid_submission_passes() {
        let input = responses(json!({ "f1": "Ada", "f2": true, "f3": "L" }));
        assert!(validate_responses(&schema(), &input).is_ok());
    }

    #[test]
    fn unknown_key_rejected() {
        let input = responses(json!({ "f1": "Ada", "bogus": "x" }));
        let err = validate_responses(&schema(), &input).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn missing_required_field_rejected() {
        let input = responses(json!({ "f2": false }));
        let err = validate_responses(&schema(), &input).unwrap_err();
        assert!(err.to_string().contains("Full Name"));
    }

    #[test]
    fn empty_string_does_not_satisfy_required() {
        let input = responses(json!({ "f1": "" }));
        assert!(validate_responses(&schema(), &input).is_err());
    }

    #[test]
    fn false_is_a_valid_checkbox_answer() {
        let mut fields = schema();
        fields[1].required = true;
        let input = responses(json!({ "f1": "Ada", "f2": false }));
        assert!(validate_responses(&fields, &input).is_ok());
    }

    #[test]
    fn checkbox_rejects_string_value() {
        let input = responses(json!({ "f1": "Ada", "f2": "yes" }));
        assert!(validate_responses(&schema(), &input).is_err());
    }

    #[test]
    fn select_rejects_unlisted_option() {
        let input = responses(json!({ "f1": "Ada", "f3": "XXL" }));
        assert!(validate_responses(&schema(), &input).is_err());
    }

    #[test]
    fn assign_ids_preserves_existing() {
        let mut fields = schema();
        fields.push(FormField {
            id: String::new(),
            label: "New Field".into(),
            field_type: FieldType::Text,
            required: false,
            options: None,
        });

        assign_field_ids(&mut fields);

        assert_eq!(fields[0].id, "f1");
        assert!(!fields[3].id.is_empty());
        assert!(Uuid::parse_str(&fields[3].id).is_ok());
    }
}
