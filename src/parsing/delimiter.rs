//! Delimiter detection for uploaded files.

/// Detects the field delimiter by counting tabs vs commas in the header row.
///
/// Ties go to tab: a tab-delimited export whose header happens to contain
/// commas inside names must still be read as tab-delimited. This function
/// cannot fail — it always returns one of the two delimiters.
///
/// # Example
///
/// ```
/// use member_import::parsing::detect_delimiter;
///
/// assert_eq!(detect_delimiter("DONMAN #,First Name,Surname"), ',');
/// assert_eq!(detect_delimiter("DONMAN #\tFirst Name\tSurname"), '\t');
/// ```
pub fn detect_delimiter(header_line: &str) -> char {
    let tab_count = header_line.chars().filter(|c| *c == '\t').count();
    let comma_count = header_line.chars().filter(|c| *c == ',').count();
    if tab_count >= comma_count { '\t' } else { ',' }
}
