//! CSV export of persisted members.
//!
//! Renders every member joined with their most recent membership back to a
//! DONMAN-style CSV, with the same filters the members list supports.

use crate::models::{Member, MemberCategory, Membership, MembershipStatus, RenewalStatus};
use crate::parsing::write_row;

/// The export header columns, in output order.
const EXPORT_COLUMNS: &[&str] = &[
    "DonmanId",
    "FirstName",
    "Surname",
    "Title",
    "Email",
    "Mobile",
    "AddressStreet",
    "AddressSuburb",
    "AddressState",
    "AddressPostcode",
    "Notes",
    "UpdateEpas",
    "Status",
    "Type",
    "PayType",
    "Rights",
    "Category",
    "RenewalStatus",
    "DateLastPaid",
];

/// Filters applied to the export, mirroring the members list.
///
/// The search term matches case-insensitively against first name, surname
/// and email. The three enum filters match the member's most recent
/// membership; members with no membership at all are excluded by any enum
/// filter.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    /// Case-insensitive substring search over names and email.
    pub search: Option<String>,
    /// Keep only members whose current membership has this status.
    pub status: Option<MembershipStatus>,
    /// Keep only members whose current membership has this category.
    pub category: Option<MemberCategory>,
    /// Keep only members whose current membership has this renewal status.
    pub renewal_status: Option<RenewalStatus>,
}

impl ExportFilter {
    fn matches(&self, member: &Member, membership: Option<&Membership>) -> bool {
        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            let hit = member.first_name.to_lowercase().contains(&term)
                || member.surname.to_lowercase().contains(&term)
                || member
                    .email
                    .as_ref()
                    .is_some_and(|e| e.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status {
            if membership.map(|ms| ms.status) != Some(status) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if membership.map(|ms| ms.category) != Some(category) {
                return false;
            }
        }
        if let Some(renewal_status) = self.renewal_status {
            if membership.map(|ms| ms.renewal_status) != Some(renewal_status) {
                return false;
            }
        }

        true
    }
}

fn member_row(member: &Member, membership: Option<&Membership>) -> Vec<String> {
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();

    vec![
        member.donman_id.map(|id| id.to_string()).unwrap_or_default(),
        member.first_name.clone(),
        member.surname.clone(),
        opt(&member.title),
        opt(&member.email),
        opt(&member.mobile),
        opt(&member.address_street),
        opt(&member.address_suburb),
        opt(&member.address_state),
        opt(&member.address_postcode),
        opt(&member.notes),
        opt(&member.update_epas),
        membership.map(|ms| ms.status.to_string()).unwrap_or_default(),
        membership
            .map(|ms| ms.membership_type.to_string())
            .unwrap_or_default(),
        membership
            .map(|ms| ms.pay_type.to_string())
            .unwrap_or_default(),
        membership.map(|ms| ms.rights.to_string()).unwrap_or_default(),
        membership
            .map(|ms| ms.category.to_string())
            .unwrap_or_default(),
        membership
            .map(|ms| ms.renewal_status.to_string())
            .unwrap_or_default(),
        membership
            .and_then(|ms| ms.date_last_paid)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default(),
    ]
}

/// Renders the filtered members as CSV text.
///
/// Rows are ordered by surname then first name; fields are quoted only where
/// RFC 4180 requires it, so the output re-parses under the import tokenizer.
pub fn render_csv(rows: &[(Member, Option<Membership>)], filter: &ExportFilter) -> String {
    let mut selected: Vec<&(Member, Option<Membership>)> = rows
        .iter()
        .filter(|(member, membership)| filter.matches(member, membership.as_ref()))
        .collect();
    selected.sort_by(|a, b| {
        (a.0.surname.as_str(), a.0.first_name.as_str())
            .cmp(&(b.0.surname.as_str(), b.0.first_name.as_str()))
    });

    let header: Vec<String> = EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut output = write_row(&header, ',');
    output.push('\n');

    for (member, membership) in selected {
        output.push_str(&write_row(&member_row(member, membership.as_ref()), ','));
        output.push('\n');
    }

    output
}
