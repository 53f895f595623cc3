//! Row parsing: one input line to one validation outcome.

use chrono::Utc;

use crate::config::ImportConfig;
use crate::models::{Member, Membership, ValidationError};

use super::address::parse_australian_address;
use super::fields::{
    RowContext, parse_category, parse_date_last_paid, parse_membership_status,
    parse_membership_type, parse_pay_type, parse_renewal_status, parse_rights,
};
use super::tokenizer::tokenize_line;

/// The outcome of parsing a single data row.
///
/// Invalid rows carry every accumulated [`ValidationError`]; valid rows carry
/// the constructed [`Member`] and [`Membership`] pair ready for persistence.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    /// The 1-based file line number (the header is line 1).
    pub row_number: usize,
    /// The raw DONMAN identifier field, trimmed.
    pub raw_donman_id: String,
    /// The parsed DONMAN identifier, once known.
    pub donman_id: Option<i32>,
    /// Display name built from the name columns, for error reporting.
    pub name: String,
    /// Whether the row accumulated zero errors.
    pub is_valid: bool,
    /// Every field-level problem found on the row.
    pub errors: Vec<ValidationError>,
    /// The member to persist, present only when the row is valid.
    pub member: Option<Member>,
    /// The membership to persist, present only when the row is valid.
    pub membership: Option<Membership>,
}

impl ParsedRow {
    fn invalid(row_number: usize, raw_donman_id: String, errors: Vec<ValidationError>) -> Self {
        Self {
            row_number,
            raw_donman_id,
            donman_id: None,
            name: String::new(),
            is_valid: false,
            errors,
            member: None,
            membership: None,
        }
    }
}

fn null_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses one non-header, non-blank line into a [`ParsedRow`].
///
/// The row is rejected immediately on a short column count, an empty
/// identifier, or a non-integer identifier — nothing downstream can proceed
/// without a row identity for error context. Once the identifier is known,
/// every remaining field normalizer runs unconditionally so the row reports
/// all of its problems at once; partial validity is never granted.
pub fn parse_row(line: &str, delimiter: char, row_number: usize, config: &ImportConfig) -> ParsedRow {
    let cols = &config.columns;
    let fields = tokenize_line(line, delimiter);

    if fields.len() < config.min_columns {
        let error = ValidationError::new(
            row_number,
            None,
            None,
            "ColumnCount",
            fields.len().to_string(),
            format!(
                "Expected at least {} columns but found {}.",
                config.min_columns,
                fields.len()
            ),
        );
        return ParsedRow::invalid(row_number, String::new(), vec![error]);
    }

    // A misconfigured layout may point past the tokenized width; read as
    // empty rather than panicking.
    let field = |index: usize| fields.get(index).map(String::as_str).unwrap_or("").trim();

    let raw_donman_id = field(cols.donman_id).to_string();

    if raw_donman_id.is_empty() {
        let error = ValidationError::new(
            row_number,
            None,
            None,
            "DonmanId",
            &raw_donman_id,
            "DONMAN # is empty.",
        );
        return ParsedRow::invalid(row_number, raw_donman_id, vec![error]);
    }

    let donman_id: i32 = match raw_donman_id.parse() {
        Ok(id) => id,
        Err(_) => {
            let error = ValidationError::new(
                row_number,
                None,
                None,
                "DonmanId",
                &raw_donman_id,
                format!("Invalid DONMAN # value: '{raw_donman_id}'. Expected a whole number."),
            );
            return ParsedRow::invalid(row_number, raw_donman_id, vec![error]);
        }
    };

    let first_name = field(cols.first_name).to_string();
    let surname = field(cols.surname).to_string();
    let name = format!("{first_name} {surname}").trim().to_string();

    let ctx = RowContext {
        row: row_number,
        donman_id: Some(raw_donman_id.clone()),
        name: Some(name.clone()),
    };

    // Every normalizer runs, accumulating all errors before validity is
    // decided.
    let mut errors = Vec::new();
    let pay_type = parse_pay_type(field(cols.pay_type), &ctx, &mut errors);
    let status = parse_membership_status(field(cols.status), &ctx, &mut errors);
    let membership_type = parse_membership_type(field(cols.membership_type), &ctx, &mut errors);
    let rights = parse_rights(field(cols.rights), &ctx, &mut errors);
    let category = parse_category(field(cols.category), &ctx, &mut errors);
    let renewal_status = parse_renewal_status(field(cols.renewal_status), &ctx, &mut errors);
    let date_last_paid = parse_date_last_paid(field(cols.date_last_paid), &ctx, &mut errors);

    // Address decomposition is best-effort and cannot fail.
    let address = parse_australian_address(field(cols.address));

    if !errors.is_empty() {
        return ParsedRow {
            row_number,
            raw_donman_id,
            donman_id: Some(donman_id),
            name,
            is_valid: false,
            errors,
            member: None,
            membership: None,
        };
    }

    let now = Utc::now();

    let member = Member {
        id: 0,
        donman_id: Some(donman_id),
        first_name,
        surname,
        title: null_if_empty(field(cols.title)),
        email: null_if_empty(field(cols.email)),
        mobile: null_if_empty(field(cols.mobile)),
        mailchimp_name: null_if_empty(field(cols.mailchimp_name)),
        address_street: null_if_empty(&address.street),
        address_suburb: null_if_empty(&address.suburb),
        address_state: null_if_empty(&address.state),
        address_postcode: null_if_empty(&address.postcode),
        notes: null_if_empty(field(cols.notes)),
        update_epas: null_if_empty(field(cols.update_epas)),
        org_foundation: null_if_empty(field(cols.org_foundation)),
        created_at: now,
        updated_at: now,
    };

    let membership = Membership {
        id: 0,
        membership_type,
        pay_type,
        status,
        rights,
        category,
        renewal_status,
        start_date: now,
        end_date: None,
        date_last_paid,
        created_at: now,
        updated_at: now,
    };

    ParsedRow {
        row_number,
        raw_donman_id,
        donman_id: Some(donman_id),
        name,
        is_valid: true,
        errors: Vec::new(),
        member: Some(member),
        membership: Some(membership),
    }
}
