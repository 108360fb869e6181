//! Cell and number formatting for markdown tables.

use crate::models::SampleValue;

/// Longest string cell rendered without truncation.
pub const MAX_CELL_CHARS: usize = 50;

const KEPT_CHARS: usize = MAX_CELL_CHARS.saturating_sub(ELLIPSIS.len());
const ELLIPSIS: &str = "...";

/// Formats an integer with `,` thousands separators.
///
/// ```rust
/// use dbdict_core::report::format_thousands;
///
/// assert_eq!(format_thousands(1_234_567), "1,234,567");
/// assert_eq!(format_thousands(999), "999");
/// ```
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    // Groups are cut from the right; every byte is an ASCII digit
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .filter_map(|group| std::str::from_utf8(group).ok())
        .collect::<Vec<&str>>()
        .join(",")
}

/// Escapes pipes, flattens line breaks and truncates to
/// [`MAX_CELL_CHARS`] characters.
pub fn escape_cell(text: &str) -> String {
    let escaped = text
        .replace('|', "\\|")
        .replace('\n', " ")
        .replace('\r', " ");

    if escaped.chars().count() > MAX_CELL_CHARS {
        let kept: String = escaped.chars().take(KEPT_CHARS).collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        escaped
    }
}

/// Renders one sample value as a table cell.
///
/// NULL becomes `NULL`; text and binary values are escaped and truncated;
/// numbers and temporal values are shown as-is.
pub fn format_sample_cell(value: &SampleValue) -> String {
    match value {
        SampleValue::Null => "NULL".to_string(),
        v if v.is_textual() => escape_cell(&v.to_string()),
        v => v.to_string(),
    }
}

/// Joins cells into a `| a | b |` markdown row.
pub fn markdown_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells: Vec<S> = cells.into_iter().collect();
    let joined = cells
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" | ");
    format!("| {} |", joined)
}

/// Output file name for a table, `{database}.{table}.md`.
///
/// Path separators inside either name are replaced with `_` so the file
/// always lands directly in the output directory.
pub fn report_file_name(database: &str, table: &str) -> String {
    let clean = |name: &str| name.replace(['/', '\\'], "_");
    format!("{}.{}.md", clean(database), clean(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        let cases = [
            (0, "0"),
            (7, "7"),
            (999, "999"),
            (1_000, "1,000"),
            (12_345, "12,345"),
            (100, "100"),
            (123_456, "123,456"),
            (1_000_000, "1,000,000"),
            (1_234_567, "1,234,567"),
            (u64::MAX, "18,446,744,073,709,551,615"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_thousands(value), expected, "Failed for {}", value);
        }
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line1\nline2\r\n"), "line1 line2  ");
        assert_eq!(escape_cell(&"x".repeat(50)), "x".repeat(50));

        let long = escape_cell(&"y".repeat(51));
        assert_eq!(long.chars().count(), 50);
        assert!(long.ends_with("..."));
        assert!(long.starts_with(&"y".repeat(47)));
    }

    #[test]
    fn test_escape_cell_counts_characters() {
        let text = "é".repeat(60);
        let cell = escape_cell(&text);
        assert_eq!(cell.chars().count(), 50);
    }

    #[test]
    fn test_format_sample_cell() {
        assert_eq!(format_sample_cell(&SampleValue::Null), "NULL");
        assert_eq!(format_sample_cell(&SampleValue::Integer(12)), "12");
        assert_eq!(format_sample_cell(&SampleValue::from("a|b")), "a\\|b");
        assert_eq!(format_sample_cell(&SampleValue::Bytes(vec![1, 2, 3])), "base64:AQID");
        assert_eq!(
            format_sample_cell(&SampleValue::Decimal("1234.50".to_string())),
            "1234.50"
        );
    }

    #[test]
    fn test_markdown_row() {
        assert_eq!(markdown_row(["a", "b"]), "| a | b |");
        assert_eq!(markdown_row(vec!["---".to_string(); 3]), "| --- | --- | --- |");
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("shop", "orders"), "shop.orders.md");
        assert_eq!(report_file_name("a/b", "c\\d"), "a_b.c_d.md");
    }
}
