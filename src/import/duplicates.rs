//! Duplicate detection across the persisted store and the file itself.

use std::collections::HashSet;

/// Where a duplicate identifier was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    /// The identifier already exists among persisted members.
    InDatabase,
    /// The identifier was already accepted earlier in the same file.
    InFile,
}

impl DuplicateKind {
    /// The skip reason reported for this kind of duplicate.
    pub fn reason(&self) -> &'static str {
        match self {
            DuplicateKind::InDatabase => "Already exists in database",
            DuplicateKind::InFile => "Duplicate within file",
        }
    }
}

/// Tracks the two identifier scopes a row must clear before acceptance.
///
/// The persisted set is loaded once at the start of a request and never
/// refreshed mid-operation; the in-file set grows in row order as rows are
/// accepted, and its lifetime is bounded to one request. The persisted check
/// always precedes the in-file check.
#[derive(Debug)]
pub struct DuplicateChecker {
    persisted: HashSet<i32>,
    seen_in_file: HashSet<i32>,
}

impl DuplicateChecker {
    /// Creates a checker over the identifiers already persisted.
    pub fn new(persisted: HashSet<i32>) -> Self {
        Self {
            persisted,
            seen_in_file: HashSet::new(),
        }
    }

    /// Classifies an identifier, or returns `None` if it is not a duplicate.
    pub fn check(&self, donman_id: i32) -> Option<DuplicateKind> {
        if self.persisted.contains(&donman_id) {
            Some(DuplicateKind::InDatabase)
        } else if self.seen_in_file.contains(&donman_id) {
            Some(DuplicateKind::InFile)
        } else {
            None
        }
    }

    /// Records an accepted identifier so later rows in the same file are
    /// caught as duplicates.
    pub fn record(&mut self, donman_id: i32) {
        self.seen_in_file.insert(donman_id);
    }
}
