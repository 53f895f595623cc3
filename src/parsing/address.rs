//! Australian address decomposition.
//!
//! Splits a free-text address like `"5 Smith St Mornington VIC 3931"` into
//! street, suburb, state and postcode. The heuristic is best-effort by
//! contract: an address without a recognisable street suffix or state token
//! still produces output, it just lands less precisely. Decomposition never
//! raises validation errors.

/// Australian state and territory abbreviations.
pub const AUSTRALIAN_STATES: &[&str] = &["NSW", "VIC", "QLD", "SA", "WA", "TAS", "NT", "ACT"];

/// Street-type suffixes that end the street portion of an address.
const STREET_SUFFIXES: &[&str] = &[
    "St", "Street", "Rd", "Road", "Ave", "Avenue", "Dr", "Drive", "Ct", "Court", "Pl", "Place",
    "Cres", "Crescent", "Blvd", "Boulevard", "Ln", "Lane", "Tce", "Terrace", "Way", "Cl", "Close",
    "Pde", "Parade", "Hwy", "Highway", "Cir", "Circle", "Gr", "Grove",
];

/// The decomposed parts of an Australian address.
///
/// Every part defaults to empty; absent parts stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Street number and name, up to and including the street-type suffix.
    pub street: String,
    /// Suburb, between the street suffix and the state/postcode.
    pub suburb: String,
    /// Uppercased state abbreviation, when recognised.
    pub state: String,
    /// Four-digit postcode, when present.
    pub postcode: String,
}

fn is_state(token: &str) -> bool {
    AUSTRALIAN_STATES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(token))
}

fn is_postcode(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}

/// Finds where the street ends and the suburb begins.
///
/// Scans left to right for the first token matching a street-type suffix,
/// with or without a trailing period. Returns the index of the first suburb
/// token, or 0 if no split point is found.
fn find_street_end(tokens: &[&str], end_of_address: usize) -> usize {
    for (i, token) in tokens.iter().enumerate().take(end_of_address) {
        let clean = token.trim_end_matches('.');
        if STREET_SUFFIXES.iter().any(|s| s.eq_ignore_ascii_case(clean)) {
            return i + 1;
        }
    }
    0
}

/// Decomposes a free-text Australian address.
///
/// The last token is taken as the postcode if it is exactly four digits; the
/// token before it (or the last token, when there is no postcode) is taken
/// as the state if it matches an Australian state abbreviation. The
/// remaining "addressable span" is split into street and suburb at the first
/// street-type suffix; if none is found the whole span becomes the street.
///
/// # Example
///
/// ```
/// use member_import::parsing::parse_australian_address;
///
/// let parsed = parse_australian_address("5 Smith St Mornington VIC 3931");
/// assert_eq!(parsed.street, "5 Smith St");
/// assert_eq!(parsed.suburb, "Mornington");
/// assert_eq!(parsed.state, "VIC");
/// assert_eq!(parsed.postcode, "3931");
/// ```
pub fn parse_australian_address(address: &str) -> ParsedAddress {
    let mut parsed = ParsedAddress::default();

    let tokens: Vec<&str> = address.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return parsed;
    }

    let mut postcode_index = None;
    let mut state_index = None;

    if is_postcode(tokens[tokens.len() - 1]) {
        parsed.postcode = tokens[tokens.len() - 1].to_string();
        postcode_index = Some(tokens.len() - 1);

        if tokens.len() >= 2 && is_state(tokens[tokens.len() - 2]) {
            parsed.state = tokens[tokens.len() - 2].to_uppercase();
            state_index = Some(tokens.len() - 2);
        }
    } else if is_state(tokens[tokens.len() - 1]) {
        parsed.state = tokens[tokens.len() - 1].to_uppercase();
        state_index = Some(tokens.len() - 1);
    }

    // The addressable span stops at the state if found, else the postcode,
    // else runs the whole token list.
    let end_of_address = state_index.or(postcode_index).unwrap_or(tokens.len());

    let street_end = find_street_end(&tokens, end_of_address);

    if street_end > 0 && street_end < end_of_address {
        parsed.street = tokens[..street_end].join(" ");
        parsed.suburb = tokens[street_end..end_of_address].join(" ");
    } else {
        parsed.street = tokens[..end_of_address].join(" ");
    }

    parsed
}
