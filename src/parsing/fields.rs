//! Field normalizers for the DONMAN export.
//!
//! Every normalizer takes the trimmed raw value plus the row context and an
//! accumulating error list, and returns a typed value — the default on
//! failure — while appending a [`ValidationError`] instead of returning an
//! error. A row therefore reports every failing field at once; normalization
//! never short-circuits.
//!
//! The procedure is uniform across the six classification enums:
//! 1. empty input → "is empty" error, default value;
//! 2. strip internal spaces;
//! 3. check the field's legacy aliases;
//! 4. case-insensitive match against the canonical name set;
//! 5. otherwise → "Invalid ..." error naming the allowed values, default.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::models::{
    MemberCategory, MemberRights, MembershipStatus, MembershipType, PayType, RenewalStatus,
    ValidationError,
};

/// Row context threaded through the normalizers for error reporting.
#[derive(Debug, Clone)]
pub struct RowContext {
    /// The 1-based file line number (the header is line 1).
    pub row: usize,
    /// The raw DONMAN identifier, once extracted.
    pub donman_id: Option<String>,
    /// The display name, once built.
    pub name: Option<String>,
}

impl RowContext {
    /// Creates a context for the given file line number.
    pub fn new(row: usize) -> Self {
        Self {
            row,
            donman_id: None,
            name: None,
        }
    }

    fn error(
        &self,
        field: &str,
        value: &str,
        message: impl Into<String>,
    ) -> ValidationError {
        ValidationError::new(
            self.row,
            self.donman_id.as_deref(),
            self.name.as_deref(),
            field,
            value,
            message,
        )
    }
}

/// A classification enum that can be normalized from a DONMAN token.
trait DonmanField: Copy + Default {
    /// The field name recorded on validation errors.
    const FIELD: &'static str;
    /// The label used in "is empty" messages.
    const EMPTY_LABEL: &'static str;
    /// The label used in "Invalid ..." messages.
    const INVALID_LABEL: &'static str;
    /// The comma-separated allowed value list.
    const EXPECTED: &'static str;

    /// Legacy token spellings particular to this field.
    fn from_alias(_normalized: &str) -> Option<Self> {
        None
    }

    /// Case-insensitive match against the canonical name set.
    fn from_canonical(normalized: &str) -> Option<Self>;
}

fn parse_enum_field<T: DonmanField>(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> T {
    if value.trim().is_empty() {
        errors.push(ctx.error(
            T::FIELD,
            value,
            format!("{} is empty. Expected one of: {}.", T::EMPTY_LABEL, T::EXPECTED),
        ));
        return T::default();
    }

    let normalized = value.replace(' ', "");

    if let Some(parsed) = T::from_alias(&normalized) {
        return parsed;
    }
    if let Some(parsed) = T::from_canonical(&normalized) {
        return parsed;
    }

    errors.push(ctx.error(
        T::FIELD,
        value,
        format!(
            "Invalid {}: '{}'. Expected one of: {}.",
            T::INVALID_LABEL,
            value,
            T::EXPECTED
        ),
    ));
    T::default()
}

impl DonmanField for PayType {
    const FIELD: &'static str = "PayType";
    const EMPTY_LABEL: &'static str = "Pay type";
    const INVALID_LABEL: &'static str = "Pay type";
    const EXPECTED: &'static str = PayType::EXPECTED;

    fn from_alias(normalized: &str) -> Option<Self> {
        if normalized.eq_ignore_ascii_case("ANNUAL") {
            Some(PayType::Annual)
        } else if normalized.eq_ignore_ascii_case("AUTO") {
            Some(PayType::Auto)
        } else if normalized.eq_ignore_ascii_case("NotApplicable") {
            Some(PayType::NotApplicable)
        } else {
            None
        }
    }

    fn from_canonical(normalized: &str) -> Option<Self> {
        Self::from_name(normalized)
    }
}

impl DonmanField for MembershipStatus {
    const FIELD: &'static str = "Status";
    const EMPTY_LABEL: &'static str = "Status";
    const INVALID_LABEL: &'static str = "Status";
    const EXPECTED: &'static str = MembershipStatus::EXPECTED;

    fn from_alias(normalized: &str) -> Option<Self> {
        if normalized.eq_ignore_ascii_case("Active") {
            Some(MembershipStatus::Active)
        } else if normalized.eq_ignore_ascii_case("NonActive") {
            Some(MembershipStatus::NonActive)
        } else {
            None
        }
    }

    fn from_canonical(normalized: &str) -> Option<Self> {
        Self::from_name(normalized)
    }
}

impl DonmanField for MembershipType {
    const FIELD: &'static str = "Type";
    const EMPTY_LABEL: &'static str = "Membership type";
    const INVALID_LABEL: &'static str = "membership Type";
    const EXPECTED: &'static str = MembershipType::EXPECTED;

    fn from_canonical(normalized: &str) -> Option<Self> {
        Self::from_name(normalized)
    }
}

impl DonmanField for MemberRights {
    const FIELD: &'static str = "Rights";
    const EMPTY_LABEL: &'static str = "Rights";
    const INVALID_LABEL: &'static str = "Rights";
    const EXPECTED: &'static str = MemberRights::EXPECTED;

    fn from_alias(normalized: &str) -> Option<Self> {
        if normalized.eq_ignore_ascii_case("VotingRights") {
            Some(MemberRights::VotingRights)
        } else {
            None
        }
    }

    fn from_canonical(normalized: &str) -> Option<Self> {
        Self::from_name(normalized)
    }
}

impl DonmanField for MemberCategory {
    const FIELD: &'static str = "Category";
    const EMPTY_LABEL: &'static str = "Category (Type2)";
    const INVALID_LABEL: &'static str = "Category (Type2)";
    const EXPECTED: &'static str = MemberCategory::EXPECTED;

    fn from_alias(normalized: &str) -> Option<Self> {
        if normalized.eq_ignore_ascii_case("ExBoard") {
            Some(MemberCategory::ExBoard)
        } else {
            None
        }
    }

    fn from_canonical(normalized: &str) -> Option<Self> {
        Self::from_name(normalized)
    }
}

impl DonmanField for RenewalStatus {
    const FIELD: &'static str = "RenewalStatus";
    const EMPTY_LABEL: &'static str = "Renewal status";
    const INVALID_LABEL: &'static str = "Renewal Status";
    const EXPECTED: &'static str = RenewalStatus::EXPECTED;

    fn from_alias(normalized: &str) -> Option<Self> {
        if normalized.eq_ignore_ascii_case("ToRenew") {
            Some(RenewalStatus::ToRenew)
        } else if normalized.eq_ignore_ascii_case("NotRenewing") {
            Some(RenewalStatus::NotRenewing)
        } else {
            None
        }
    }

    fn from_canonical(normalized: &str) -> Option<Self> {
        Self::from_name(normalized)
    }
}

/// Maps a DONMAN Pay type token to [`PayType`].
pub fn parse_pay_type(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> PayType {
    parse_enum_field(value, ctx, errors)
}

/// Maps a DONMAN Status token to [`MembershipStatus`].
pub fn parse_membership_status(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> MembershipStatus {
    parse_enum_field(value, ctx, errors)
}

/// Maps a DONMAN Type token to [`MembershipType`].
pub fn parse_membership_type(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> MembershipType {
    parse_enum_field(value, ctx, errors)
}

/// Maps a DONMAN Rights token to [`MemberRights`].
pub fn parse_rights(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> MemberRights {
    parse_enum_field(value, ctx, errors)
}

/// Maps a DONMAN Type2 (Category) token to [`MemberCategory`].
pub fn parse_category(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> MemberCategory {
    parse_enum_field(value, ctx, errors)
}

/// Maps a DONMAN Renewal Status token to [`RenewalStatus`].
pub fn parse_renewal_status(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> RenewalStatus {
    parse_enum_field(value, ctx, errors)
}

// chrono's numeric specifiers accept both padded and unpadded digits, so
// these five patterns cover all twelve legacy spellings listed in the error
// message below.
const DATE_FORMATS_4Y: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d.%m.%Y"];
const DATE_FORMATS_2Y: &[&str] = &["%d/%m/%y"];

const DATE_FORMAT_NAMES: &str = "dd/MM/yyyy, d/MM/yyyy, d/M/yyyy, dd-MM-yyyy, d-MM-yyyy, \
                                 d-M-yyyy, yyyy-MM-dd, dd/MM/yy, d/MM/yy, d/M/yy, \
                                 dd.MM.yyyy, d.MM.yyyy";

/// Parses the Date Last Paid field, trying the legacy formats in order.
///
/// Empty input is not an error and yields `None`. A non-empty value that
/// matches none of the formats yields `None` plus one [`ValidationError`]
/// listing every attempted format. The parsed date is returned at UTC
/// midnight — the field carries no meaningful time component.
pub fn parse_date_last_paid(
    value: &str,
    ctx: &RowContext,
    errors: &mut Vec<ValidationError>,
) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = DATE_FORMATS_4Y
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        // A four-digit-year pattern must not swallow a two-digit year: the
        // export writes "24" to mean 2024, never the year 24.
        .find(|d| d.year() >= 100)
        .or_else(|| {
            DATE_FORMATS_2Y
                .iter()
                .filter_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .next()
        });

    match parsed {
        Some(date) => Some(date.and_time(NaiveTime::MIN).and_utc()),
        None => {
            errors.push(ctx.error(
                "DateLastPaid",
                value,
                format!(
                    "Invalid date format for DateLastPaid: '{value}'. Expected formats: {DATE_FORMAT_NAMES}."
                ),
            ));
            None
        }
    }
}
