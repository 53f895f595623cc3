//! The validate-mode report.

use serde::{Deserialize, Serialize};

use crate::models::{SkippedRow, ValidationError};

/// The complete outcome of a validate request.
///
/// Validate mode always returns a whole report, never a partial one. Note
/// that `error_count` counts rows with at least one error, not individual
/// errors — one row can fail on several fields at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// The number of non-blank data rows processed.
    pub total_rows: usize,
    /// Rows that parsed cleanly and were not duplicates.
    pub valid_count: usize,
    /// The number of distinct rows with at least one error.
    pub error_count: usize,
    /// The number of rows skipped as duplicates.
    pub skipped_count: usize,
    /// The skipped rows, in row order.
    pub skipped: Vec<SkippedRow>,
    /// Every field-level error found, in row order.
    pub errors: Vec<ValidationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_with_camel_case_keys() {
        let report = ValidationReport {
            total_rows: 10,
            valid_count: 7,
            error_count: 2,
            skipped_count: 1,
            skipped: vec![SkippedRow {
                donman_id: 1042,
                name: "Jane Citizen".to_string(),
                reason: "Already exists in database".to_string(),
            }],
            errors: vec![],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"totalRows\":10"));
        assert!(json.contains("\"validCount\":7"));
        assert!(json.contains("\"errorCount\":2"));
        assert!(json.contains("\"skippedCount\":1"));
        assert!(json.contains("\"donmanId\":1042"));
    }
}
