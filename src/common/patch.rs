// src/common/patch.rs

use serde::{Deserialize, Deserializer};

use crate::common::error::AppError;

// Distinguishes an absent field (None) from an explicit null (Some(None)).
// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrites `slot` only when the patch carried a value.
pub fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Like [`assign`] for nullable text: an explicit null or blank string clears the field.
pub fn assign_nullable(slot: &mut Option<String>, value: Option<Option<String>>) {
    if let Some(value) = value {
        *slot = blank_to_none(value);
    }
}

pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn require_id(id: Option<&str>) -> Result<String, AppError> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(AppError::MissingField("ID")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        let value: Probe = serde_json::from_str(r#"{"notes": "late"}"#).unwrap();

        assert_eq!(absent.notes, None);
        assert_eq!(null.notes, Some(None));
        assert_eq!(value.notes, Some(Some("late".to_string())));
    }

    #[test]
    fn assign_nullable_keeps_clears_and_replaces() {
        let mut notes = Some("old".to_string());
        assign_nullable(&mut notes, None);
        assert_eq!(notes.as_deref(), Some("old"));

        assign_nullable(&mut notes, Some(Some("new".to_string())));
        assert_eq!(notes.as_deref(), Some("new"));

        assign_nullable(&mut notes, Some(Some("  ".to_string())));
        assert_eq!(notes, None);

        notes = Some("again".to_string());
        assign_nullable(&mut notes, Some(None));
        assert_eq!(notes, None);
    }

    #[test]
    fn require_id_rejects_missing_and_blank() {
        assert!(matches!(require_id(None), Err(AppError::MissingField("ID"))));
        assert!(matches!(require_id(Some("  ")), Err(AppError::MissingField("ID"))));
        assert_eq!(require_id(Some("a1b2c3d4e")).unwrap(), "a1b2c3d4e");
    }
}
