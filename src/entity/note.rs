// src/entity/note.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Strings accepted as a "yes" for the `important` flag, compared case-insensitively.
const TRUTHY_VALUES: [&str; 4] = ["true", "1", "on", "yes"];

/// Rejection raised while building a [`Note`] from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    MissingField(&'static str),

    #[error("field '{0}' must be a string")]
    NotAString(&'static str),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) | ValidationError::NotAString(field) => field,
        }
    }
}

/// A validated note, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub description: String,
    pub important: bool,
}

impl Note {
    pub fn new(title: impl Into<String>, description: impl Into<String>, important: bool) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            important,
        }
    }

    /// Build a note from raw submitted fields.
    ///
    /// `title` and `description` must be present and be strings. `important`
    /// never fails: it goes through [`normalize_important`].
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let title = required_string(fields, "title")?;
        let description = required_string(fields, "description")?;
        let important = normalize_important(fields.get("important"));

        Ok(Self {
            title,
            description,
            important,
        })
    }
}

fn required_string(fields: &Map<String, Value>, name: &'static str) -> Result<String, ValidationError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::NotAString(name)),
    }
}

/// Collapse a loosely-typed `important` value into a strict boolean.
///
/// Booleans pass through. Strings are `true` only when they match one of
/// `true`, `1`, `on`, `yes` (any case). Everything else, including a
/// missing value, is `false`.
pub fn normalize_important(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => TRUTHY_VALUES.iter().any(|t| s.eq_ignore_ascii_case(t)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_truthy_strings_normalize_to_true() {
        for raw in ["true", "TRUE", "True", "1", "on", "On", "yes", "YES"] {
            assert!(
                normalize_important(Some(&json!(raw))),
                "{raw} should be important"
            );
        }
    }

    #[test]
    fn test_other_strings_normalize_to_false() {
        for raw in ["", "false", "0", "off", "no", "y", "truthy", " on", "2"] {
            assert!(
                !normalize_important(Some(&json!(raw))),
                "{raw:?} should not be important"
            );
        }
    }

    #[test]
    fn test_non_string_values_normalize_to_false() {
        assert!(!normalize_important(None));
        assert!(!normalize_important(Some(&Value::Null)));
        assert!(!normalize_important(Some(&json!(1))));
        assert!(!normalize_important(Some(&json!(["on"]))));
        assert!(!normalize_important(Some(&json!({"on": true}))));
    }

    #[test]
    fn test_booleans_pass_through() {
        assert!(normalize_important(Some(&json!(true))));
        assert!(!normalize_important(Some(&json!(false))));
    }

    #[test]
    fn test_from_fields_builds_note() {
        let note = Note::from_fields(&fields(json!({
            "title": "Buy milk",
            "description": "2%",
            "important": "on",
        })))
        .unwrap();

        assert_eq!(note, Note::new("Buy milk", "2%", true));
    }

    #[test]
    fn test_from_fields_without_important_is_not_important() {
        let note = Note::from_fields(&fields(json!({
            "title": "Call mom",
            "description": "Sunday",
        })))
        .unwrap();

        assert!(!note.important);
    }

    #[test]
    fn test_from_fields_swallows_malformed_important() {
        let note = Note::from_fields(&fields(json!({
            "title": "t",
            "description": "d",
            "important": 42,
        })))
        .unwrap();

        assert!(!note.important);
    }

    #[test]
    fn test_from_fields_rejects_missing_title() {
        let result = Note::from_fields(&fields(json!({ "description": "d" })));
        assert_eq!(result, Err(ValidationError::MissingField("title")));
    }

    #[test]
    fn test_from_fields_rejects_missing_description() {
        let result = Note::from_fields(&fields(json!({ "title": "t", "description": null })));
        assert_eq!(result, Err(ValidationError::MissingField("description")));
    }

    #[test]
    fn test_from_fields_rejects_non_string_title() {
        let result = Note::from_fields(&fields(json!({ "title": 7, "description": "d" })));
        let err = result.unwrap_err();
        assert_eq!(err, ValidationError::NotAString("title"));
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn test_from_fields_accepts_empty_strings() {
        let note = Note::from_fields(&fields(json!({ "title": "", "description": "" }))).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.description, "");
    }
}
