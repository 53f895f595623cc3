//! The persisted member entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A club member.
///
/// The storage id is assigned by the persistence collaborator on insert and
/// is `0` until then. The DONMAN id is the external key carried by the legacy
/// export; when present it must be unique across all persisted members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Storage identifier, assigned on insert.
    pub id: i64,
    /// External DONMAN identifier, unique among persisted members when set.
    pub donman_id: Option<i32>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub surname: String,
    /// Salutation, e.g. "Mr" or "Dr".
    pub title: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Mobile phone number.
    pub mobile: Option<String>,
    /// The name used for the Mailchimp mailing list.
    pub mailchimp_name: Option<String>,
    /// Street portion of the decomposed address.
    pub address_street: Option<String>,
    /// Suburb portion of the decomposed address.
    pub address_suburb: Option<String>,
    /// State abbreviation (NSW, VIC, ...).
    pub address_state: Option<String>,
    /// Four-digit postcode.
    pub address_postcode: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The legacy "Update EPAS" flag, carried through verbatim.
    pub update_epas: Option<String>,
    /// Organisation or foundation affiliation.
    pub org_foundation: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Returns the display name used in reports: "first surname", trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
            .trim()
            .to_string()
    }
}
