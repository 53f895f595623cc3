//! Configuration types for the import engine.

use serde::{Deserialize, Serialize};

/// Zero-based column positions of the fields read from the DONMAN export.
///
/// The full legacy layout has 20 columns:
/// DONMAN #, First Name, Mailchimp name, Surname, Pay type, Status, Type,
/// Rights, Connected Name, Type2, Renewal Status, Date Last Paid,
/// Month Last Paid, Notes, Update EPAS, Org/Foundation, TITLE, MAIL,
/// ADDRESS, MOBILE. Connected Name (8) and Month Last Paid (12) are not
/// imported and have no entry here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ColumnLayout {
    /// DONMAN # — the external row identifier.
    pub donman_id: usize,
    /// First Name.
    pub first_name: usize,
    /// Mailchimp name.
    pub mailchimp_name: usize,
    /// Surname.
    pub surname: usize,
    /// Pay type.
    pub pay_type: usize,
    /// Status.
    pub status: usize,
    /// Type.
    pub membership_type: usize,
    /// Rights.
    pub rights: usize,
    /// Type2 (the member category).
    pub category: usize,
    /// Renewal Status.
    pub renewal_status: usize,
    /// Date Last Paid.
    pub date_last_paid: usize,
    /// Notes.
    pub notes: usize,
    /// Update EPAS.
    pub update_epas: usize,
    /// Org/Foundation.
    pub org_foundation: usize,
    /// TITLE.
    pub title: usize,
    /// MAIL.
    pub email: usize,
    /// ADDRESS.
    pub address: usize,
    /// MOBILE.
    pub mobile: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            donman_id: 0,
            first_name: 1,
            mailchimp_name: 2,
            surname: 3,
            pay_type: 4,
            status: 5,
            membership_type: 6,
            rights: 7,
            category: 9,
            renewal_status: 10,
            date_last_paid: 11,
            notes: 13,
            update_epas: 14,
            org_foundation: 15,
            title: 16,
            email: 17,
            address: 18,
            mobile: 19,
        }
    }
}

/// Configuration for the import engine.
///
/// All fields have defaults matching the legacy DONMAN export; any subset may
/// be overridden from a YAML file via
/// [`ImportConfig::load`](ImportConfig::load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ImportConfig {
    /// Column positions of the imported fields.
    pub columns: ColumnLayout,
    /// The minimum number of columns a data row must tokenize into.
    pub min_columns: usize,
    /// How many accepted rows are persisted per batch in execute mode.
    pub batch_size: usize,
    /// The maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            columns: ColumnLayout::default(),
            min_columns: 20,
            batch_size: 50,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_donman_export() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.donman_id, 0);
        assert_eq!(layout.surname, 3);
        assert_eq!(layout.category, 9);
        assert_eq!(layout.date_last_paid, 11);
        assert_eq!(layout.email, 17);
        assert_eq!(layout.mobile, 19);
    }

    #[test]
    fn test_default_thresholds() {
        let config = ImportConfig::default();
        assert_eq!(config.min_columns, 20);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let config: ImportConfig = serde_yaml::from_str("batch_size: 25\n").unwrap();
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.min_columns, 20);
        assert_eq!(config.columns, ColumnLayout::default());
    }
}
