//! An in-memory member store.
//!
//! Backs the server by default and the test suites throughout. State lives
//! behind a mutex; every method takes the lock for the duration of one
//! storage operation, which matches the batch-is-the-unit persistence model.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ImportError, ImportResult};
use crate::models::{Member, Membership, MembershipMember};

use super::MemberStore;

#[derive(Debug, Default)]
struct Inner {
    members: Vec<Member>,
    memberships: Vec<Membership>,
    links: Vec<MembershipMember>,
    next_member_id: i64,
    next_membership_id: i64,
}

/// A thread-safe in-memory implementation of [`MemberStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ImportResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| ImportError::storage("member store lock poisoned"))
    }

    /// Returns a snapshot of the persisted members.
    pub fn members(&self) -> Vec<Member> {
        self.inner.lock().map(|i| i.members.clone()).unwrap_or_default()
    }

    /// Returns a snapshot of the persisted memberships.
    pub fn memberships(&self) -> Vec<Membership> {
        self.inner
            .lock()
            .map(|i| i.memberships.clone())
            .unwrap_or_default()
    }

    /// Returns a snapshot of the persisted links.
    pub fn links(&self) -> Vec<MembershipMember> {
        self.inner.lock().map(|i| i.links.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MemberStore for InMemoryStore {
    async fn existing_donman_ids(&self) -> ImportResult<HashSet<i32>> {
        let inner = self.lock()?;
        Ok(inner.members.iter().filter_map(|m| m.donman_id).collect())
    }

    async fn insert_members(&self, members: Vec<Member>) -> ImportResult<Vec<i64>> {
        let mut inner = self.lock()?;

        let existing: HashSet<i32> = inner.members.iter().filter_map(|m| m.donman_id).collect();
        let mut incoming = HashSet::new();
        for member in &members {
            if let Some(id) = member.donman_id {
                if existing.contains(&id) || !incoming.insert(id) {
                    return Err(ImportError::storage(format!(
                        "DONMAN id {id} violates the uniqueness constraint"
                    )));
                }
            }
        }

        let mut ids = Vec::with_capacity(members.len());
        for mut member in members {
            inner.next_member_id += 1;
            member.id = inner.next_member_id;
            ids.push(member.id);
            inner.members.push(member);
        }
        Ok(ids)
    }

    async fn insert_memberships(&self, memberships: Vec<Membership>) -> ImportResult<Vec<i64>> {
        let mut inner = self.lock()?;
        let mut ids = Vec::with_capacity(memberships.len());
        for mut membership in memberships {
            inner.next_membership_id += 1;
            membership.id = inner.next_membership_id;
            ids.push(membership.id);
            inner.memberships.push(membership);
        }
        Ok(ids)
    }

    async fn insert_links(&self, links: Vec<MembershipMember>) -> ImportResult<()> {
        let mut inner = self.lock()?;
        inner.links.extend(links);
        Ok(())
    }

    async fn members_with_latest_membership(
        &self,
    ) -> ImportResult<Vec<(Member, Option<Membership>)>> {
        let inner = self.lock()?;

        let rows = inner
            .members
            .iter()
            .map(|member| {
                let latest = inner
                    .links
                    .iter()
                    .filter(|link| link.member_id == member.id)
                    .filter_map(|link| {
                        inner.memberships.iter().find(|ms| ms.id == link.membership_id)
                    })
                    .max_by_key(|ms| ms.start_date)
                    .cloned();
                (member.clone(), latest)
            })
            .collect();

        Ok(rows)
    }
}
