//! Classification enums for members and memberships.
//!
//! Each enum is a closed set of named values. The wire format and the
//! persisted format are both name-based, so every enum carries a canonical
//! name table and serializes by name — never by ordinal, which would not be
//! stable under reordering.

use serde::{Deserialize, Serialize};

/// How a membership is paid for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayType {
    /// Automatic recurring payment.
    #[default]
    Auto,
    /// Annual manual payment.
    Annual,
    /// Payment does not apply (e.g. honorary memberships).
    NotApplicable,
}

/// Whether a membership is currently active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    /// The membership is current.
    #[default]
    Active,
    /// The membership has lapsed or was closed.
    NonActive,
}

/// The household shape of a membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipType {
    /// One member.
    #[default]
    Single,
    /// Two linked members.
    Couple,
    /// A family group.
    Family,
}

/// The rights a member holds within the club.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRights {
    /// A paid-up member.
    #[default]
    Paid,
    /// An associate member without voting rights.
    Associate,
    /// A member entitled to vote at general meetings.
    VotingRights,
}

/// The category a member belongs to (the DONMAN "Type2" column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberCategory {
    /// General community member.
    #[default]
    Community,
    /// Life member.
    Life,
    /// Volunteer.
    Volunteer,
    /// Former board member.
    ExBoard,
    /// Current board member.
    Board,
    /// Doctor.
    Doctor,
    /// Family category.
    Family,
    /// Staff member.
    Staff,
}

/// Whether a membership needs renewal action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewalStatus {
    /// A new membership.
    #[default]
    New,
    /// Renewed for the current period.
    Renewed,
    /// Due for renewal.
    ToRenew,
    /// Renewal is overdue.
    Overdue,
    /// The member has indicated they will not renew.
    NotRenewing,
}

/// The role a member plays on a shared membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipRole {
    /// The member the membership is primarily held by.
    #[default]
    Primary,
    /// A partner on a couple or family membership.
    Secondary,
    /// A dependent on a family membership.
    Dependent,
}

macro_rules! name_table {
    ($ty:ident, $expected:expr, { $($name:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            /// The canonical names of every value, in declaration order.
            pub const NAMES: &'static [(&'static str, $ty)] =
                &[$(($name, $ty::$variant)),+];

            /// The comma-separated list of accepted values, for messages.
            pub const EXPECTED: &'static str = $expected;

            /// Returns the canonical name of this value.
            pub fn canonical_name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }

            /// Looks a value up by canonical name, ignoring ASCII case.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::NAMES
                    .iter()
                    .find(|(n, _)| n.eq_ignore_ascii_case(name))
                    .map(|(_, v)| *v)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.canonical_name())
            }
        }
    };
}

name_table!(PayType, "Auto, Annual, NotApplicable", {
    "Auto" => Auto,
    "Annual" => Annual,
    "NotApplicable" => NotApplicable,
});

name_table!(MembershipStatus, "Active, NonActive", {
    "Active" => Active,
    "NonActive" => NonActive,
});

name_table!(MembershipType, "Single, Couple, Family", {
    "Single" => Single,
    "Couple" => Couple,
    "Family" => Family,
});

name_table!(MemberRights, "Paid, Associate, VotingRights", {
    "Paid" => Paid,
    "Associate" => Associate,
    "VotingRights" => VotingRights,
});

name_table!(
    MemberCategory,
    "Community, Life, Volunteer, ExBoard, Board, Doctor, Family, Staff",
    {
        "Community" => Community,
        "Life" => Life,
        "Volunteer" => Volunteer,
        "ExBoard" => ExBoard,
        "Board" => Board,
        "Doctor" => Doctor,
        "Family" => Family,
        "Staff" => Staff,
    }
);

name_table!(RenewalStatus, "New, Renewed, ToRenew, Overdue, NotRenewing", {
    "New" => New,
    "Renewed" => Renewed,
    "ToRenew" => ToRenew,
    "Overdue" => Overdue,
    "NotRenewing" => NotRenewing,
});

name_table!(MembershipRole, "Primary, Secondary, Dependent", {
    "Primary" => Primary,
    "Secondary" => Secondary,
    "Dependent" => Dependent,
});
