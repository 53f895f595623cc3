//! The DONMAN export parsing pipeline.
//!
//! This module contains the delimiter detector, the quoted-field line
//! tokenizer (and its escaping dual used by the exporter), the field
//! normalizers for the six classification enums and the multi-format date
//! parser, the Australian address decomposer, and the row parser that
//! composes them into a single row's validation outcome.

mod address;
mod delimiter;
mod fields;
mod row;
mod tokenizer;

pub use address::{AUSTRALIAN_STATES, ParsedAddress, parse_australian_address};
pub use delimiter::detect_delimiter;
pub use fields::{
    RowContext, parse_category, parse_date_last_paid, parse_membership_status,
    parse_membership_type, parse_pay_type, parse_renewal_status, parse_rights,
};
pub use row::{ParsedRow, parse_row};
pub use tokenizer::{tokenize_line, write_row};
