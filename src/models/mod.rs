//! Core data models for the Member Import Engine.
//!
//! This module contains the persisted entities (members, memberships and the
//! records linking them), the six closed classification sets used by the
//! DONMAN export, and the transient row-validation types produced while a
//! file is being imported.

mod enums;
mod member;
mod membership;
mod validation;

pub use enums::{
    MemberCategory, MemberRights, MembershipRole, MembershipStatus, MembershipType, PayType,
    RenewalStatus,
};
pub use member::Member;
pub use membership::{Membership, MembershipMember};
pub use validation::{SkippedRow, ValidationError};
