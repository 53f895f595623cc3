//! Line tokenization honoring quoted fields and escaped quotes.

/// Splits one line into fields, honoring quoted and escaped content.
///
/// Outside quotes a `"` opens quote mode (the quote itself is not copied)
/// and the delimiter ends the current field. Inside quotes a doubled `""`
/// emits a literal quote, a lone `"` closes quote mode, and any other
/// character — including the delimiter — is copied verbatim. The final field
/// is always emitted, even if empty.
///
/// Malformed quoting is not an error: an unterminated quote simply treats
/// the rest of the line as quoted content.
///
/// # Example
///
/// ```
/// use member_import::parsing::tokenize_line;
///
/// let fields = tokenize_line("1042,\"Smith, John\",VIC", ',');
/// assert_eq!(fields, vec!["1042", "Smith, John", "VIC"]);
/// ```
pub fn tokenize_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    fields.push(current);
    fields
}

/// Joins fields into one delimited line, quoting where necessary.
///
/// The dual of [`tokenize_line`]: a field containing the delimiter, a quote,
/// or a line break is wrapped in quotes with internal quotes doubled, so the
/// emitted line re-tokenizes to exactly the input fields.
pub fn write_row(fields: &[String], delimiter: char) -> String {
    let escaped: Vec<String> = fields
        .iter()
        .map(|f| {
            if f.contains(delimiter) || f.contains('"') || f.contains('\n') || f.contains('\r') {
                format!("\"{}\"", f.replace('"', "\"\""))
            } else {
                f.clone()
            }
        })
        .collect();

    escaped.join(&delimiter.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fields(line: &str) -> Vec<String> {
        tokenize_line(line, ',')
    }

    #[test]
    fn test_plain_fields() {
        assert_eq!(fields("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trailing_empty_field_is_emitted() {
        assert_eq!(fields("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_empty_line_yields_one_empty_field() {
        assert_eq!(fields(""), vec![""]);
    }

    #[test]
    fn test_quoted_field_keeps_embedded_delimiter() {
        assert_eq!(fields("\"Smith, John\",x"), vec!["Smith, John", "x"]);
    }

    #[test]
    fn test_escaped_quote_emits_literal_quote() {
        assert_eq!(fields("\"She said \"\"hi\"\"\""), vec!["She said \"hi\""]);
    }

    #[test]
    fn test_quotes_are_not_copied_into_field() {
        assert_eq!(fields("\"plain\""), vec!["plain"]);
    }

    #[test]
    fn test_unterminated_quote_degrades_gracefully() {
        // The rest of the line is treated as still-quoted content.
        assert_eq!(fields("\"open,never closed"), vec!["open,never closed"]);
    }

    #[test]
    fn test_tab_delimiter() {
        assert_eq!(
            tokenize_line("a\t\"b\tc\"\td", '\t'),
            vec!["a", "b\tc", "d"]
        );
    }

    #[test]
    fn test_quote_mid_field_resumes_unquoted_scan() {
        // "a" then unquoted b: quote mode closes and the delimiter splits.
        assert_eq!(fields("\"a\"b,c"), vec!["ab", "c"]);
    }

    #[test]
    fn test_write_row_quotes_only_where_needed() {
        let row = write_row(
            &[
                "plain".to_string(),
                "has,comma".to_string(),
                "has\"quote".to_string(),
            ],
            ',',
        );
        assert_eq!(row, "plain,\"has,comma\",\"has\"\"quote\"");
    }

    #[test]
    fn test_write_row_round_trips() {
        let input = vec![
            "Smith, John".to_string(),
            "She said \"hi\"".to_string(),
            String::new(),
            "plain".to_string(),
        ];
        assert_eq!(tokenize_line(&write_row(&input, ','), ','), input);
    }

    proptest! {
        #[test]
        fn prop_write_then_tokenize_round_trips(
            fields in proptest::collection::vec("[ -~]{0,20}", 1..8)
        ) {
            let line = write_row(&fields, ',');
            prop_assert_eq!(tokenize_line(&line, ','), fields);
        }
    }
}
