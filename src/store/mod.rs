//! The persistence collaborator boundary.
//!
//! The import core does not own storage. It depends on a small trait for the
//! operations the pipeline needs: the persisted-identifier snapshot for
//! duplicate checks, batched inserts that return generated ids (links can
//! only be written once both sides have identities), and the join used by the
//! CSV exporter. Everything else the wider system does with members sits
//! behind this seam.

mod memory;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::ImportResult;
use crate::models::{Member, Membership, MembershipMember};

pub use memory::InMemoryStore;

/// Storage operations required by the import and export flows.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Returns every DONMAN identifier currently persisted.
    async fn existing_donman_ids(&self) -> ImportResult<HashSet<i32>>;

    /// Inserts members and returns their assigned storage ids, in input
    /// order. Inserting a DONMAN identifier that already exists is a fatal
    /// storage error — the store's uniqueness invariant is the final
    /// authority, whatever the duplicate checker concluded earlier.
    async fn insert_members(&self, members: Vec<Member>) -> ImportResult<Vec<i64>>;

    /// Inserts memberships and returns their assigned storage ids, in input
    /// order.
    async fn insert_memberships(&self, memberships: Vec<Membership>) -> ImportResult<Vec<i64>>;

    /// Inserts member-membership links.
    async fn insert_links(&self, links: Vec<MembershipMember>) -> ImportResult<()>;

    /// Returns every member joined with their most recent membership (the
    /// linked membership with the greatest start date), for export.
    async fn members_with_latest_membership(
        &self,
    ) -> ImportResult<Vec<(Member, Option<Membership>)>>;
}
