//! The persisted membership entity and its member links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{
    MemberCategory, MemberRights, MembershipRole, MembershipStatus, MembershipType, PayType,
    RenewalStatus,
};

/// A membership record.
///
/// Every membership is linked to at least one [`crate::models::Member`] via a
/// [`MembershipMember`] row. A member's "most recent membership" is the
/// linked membership with the greatest start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Storage identifier, assigned on insert.
    pub id: i64,
    /// Household shape of the membership.
    #[serde(rename = "type")]
    pub membership_type: MembershipType,
    /// How the membership is paid for.
    pub pay_type: PayType,
    /// Whether the membership is currently active.
    pub status: MembershipStatus,
    /// The rights held by the member(s).
    pub rights: MemberRights,
    /// The member category (DONMAN "Type2").
    pub category: MemberCategory,
    /// Whether renewal action is required.
    pub renewal_status: RenewalStatus,
    /// When the membership began.
    pub start_date: DateTime<Utc>,
    /// When the membership ended, if it has.
    pub end_date: Option<DateTime<Utc>>,
    /// The date the member last paid, at UTC midnight.
    pub date_last_paid: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Links a member to a membership with a role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipMember {
    /// The membership being linked.
    pub membership_id: i64,
    /// The member being linked.
    pub member_id: i64,
    /// The member's role on this membership.
    pub role: MembershipRole,
}
