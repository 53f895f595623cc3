//! Transient row-validation types.
//!
//! These types exist only for the duration of a single validate or execute
//! request. They carry enough context (row number, identifier, name) for a
//! user to find and fix the offending source row without re-deriving it from
//! the raw file.

use serde::{Deserialize, Serialize};

/// One field-level validation problem on one row.
///
/// A row may accumulate any number of these; the presence of any makes the
/// row invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// The 1-based file line number (the header is line 1).
    pub row: usize,
    /// The raw DONMAN identifier of the row, when one was present.
    pub donman_id: Option<String>,
    /// The display name of the row, when one could be built.
    pub name: Option<String>,
    /// The field that failed, e.g. "PayType".
    pub field: String,
    /// The offending raw value.
    pub value: String,
    /// A human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error with full row context.
    pub fn new(
        row: usize,
        donman_id: Option<&str>,
        name: Option<&str>,
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            donman_id: donman_id.map(str::to_string),
            name: name.map(str::to_string),
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// A row skipped as a duplicate rather than imported.
///
/// Duplicates are a distinct outcome, not errors: they never block other
/// rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// The DONMAN identifier of the skipped row.
    pub donman_id: i32,
    /// The display name of the skipped row.
    pub name: String,
    /// Why the row was skipped.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_serializes_with_camel_case_keys() {
        let error = ValidationError::new(
            4,
            Some("1042"),
            Some("Jane Citizen"),
            "PayType",
            "Bimonthly",
            "Invalid Pay type: 'Bimonthly'. Expected one of: Auto, Annual, NotApplicable.",
        );

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"row\":4"));
        assert!(json.contains("\"donmanId\":\"1042\""));
        assert!(json.contains("\"field\":\"PayType\""));
    }

    #[test]
    fn test_skipped_row_serializes_with_camel_case_keys() {
        let skipped = SkippedRow {
            donman_id: 1042,
            name: "Jane Citizen".to_string(),
            reason: "Duplicate within file".to_string(),
        };

        let json = serde_json::to_string(&skipped).unwrap();
        assert!(json.contains("\"donmanId\":1042"));
        assert!(json.contains("\"reason\":\"Duplicate within file\""));
    }
}
