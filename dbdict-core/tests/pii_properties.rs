//! Property tests for the PII masking engine and cell formatting.

use dbdict_core::models::SampleValue;
use dbdict_core::pii::{PII_COLUMN_PATTERNS, PiiGuard, is_pii_column, mask_value};
use dbdict_core::report::{MAX_CELL_CHARS, escape_cell, format_sample_cell};
use proptest::prelude::*;

#[test]
fn test_documented_examples() {
    let guard = PiiGuard::new(true);
    let cases = [
        ("email", "john.doe@example.com", "j***@e***.com"),
        ("phone", "555-123-4567", "***-***-4567"),
        ("ssn", "123-45-6789", "***-**-6789"),
        ("credit_card", "4111-1111-1111-1111", "****-****-****-1111"),
        ("full_name", "John Doe", "J*** D***"),
        ("email_backup", "not-an-email", "[EMAIL MASKED]"),
        ("notes", "contact jane@x.com", "c***@x***.com"),
        ("remote_host", "192.168.1.100", "***.***.***.100"),
    ];

    for (column, input, expected) in cases {
        assert_eq!(
            guard.mask(&SampleValue::from(input), column),
            SampleValue::from(expected),
            "Failed for column={}, input={}",
            column,
            input
        );
    }
}

#[test]
fn test_control_columns() {
    for name in ["id", "created_at", "status"] {
        assert!(!is_pii_column(name), "{} should not be flagged", name);
    }
}

fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_]{1,20}",
        prop::sample::select(PII_COLUMN_PATTERNS.to_vec()).prop_map(str::to_string),
    ]
}

fn sample_value() -> impl Strategy<Value = SampleValue> {
    prop_oneof![
        Just(SampleValue::Null),
        any::<i64>().prop_map(SampleValue::Integer),
        ".{0,80}".prop_map(SampleValue::Text),
        "[a-z]{1,8}@[a-z]{1,8}\\.[a-z]{2,3}".prop_map(SampleValue::Text),
        "[0-9]{3}-[0-9]{3}-[0-9]{4}".prop_map(SampleValue::Text),
        prop::collection::vec(any::<u8>(), 0..40).prop_map(SampleValue::Bytes),
        "[a-z]{1,8}@[a-z]{1,8}\\.[a-z]{2,3}".prop_map(|email| SampleValue::Bytes(email.into_bytes())),
    ]
}

fn plain_column() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["notes", "payload", "body", "raw_data"])
}

proptest! {
    #[test]
    fn prop_mask_is_deterministic(value in sample_value(), column in column_name()) {
        let guard = PiiGuard::new(true);
        prop_assert_eq!(guard.mask(&value, &column), guard.mask(&value, &column));
    }

    #[test]
    fn prop_disabled_guard_is_identity(value in sample_value(), column in column_name()) {
        let guard = PiiGuard::new(false);
        prop_assert_eq!(guard.mask(&value, &column), value);
    }

    #[test]
    fn prop_pattern_columns_always_masked(
        pattern in prop::sample::select(PII_COLUMN_PATTERNS.to_vec()),
        prefix in "[a-z]{0,5}",
        text in "[a-zA-Z0-9]{1,30}",
    ) {
        let column = format!("{}{}", prefix, pattern);
        let value = SampleValue::Text(text);
        prop_assert!(is_pii_column(&column));
        prop_assert_ne!(mask_value(&value, &column), value);
    }

    #[test]
    fn prop_binary_email_is_masked(
        prefix in "[a-z ]{0,10}",
        email in "[a-z]{1,8}@[a-z]{1,8}\\.[a-z]{2,3}",
        column in plain_column(),
    ) {
        prop_assert!(!is_pii_column(column));
        let value = SampleValue::Bytes(format!("{}{}", prefix, email).into_bytes());
        let masked = PiiGuard::new(true).mask(&value, column);

        prop_assert!(matches!(masked, SampleValue::Text(_)), "not masked: {:?}", masked);
        prop_assert!(!masked.to_string().contains(&email));
    }

    #[test]
    fn prop_null_never_masked(column in column_name()) {
        prop_assert_eq!(mask_value(&SampleValue::Null, &column), SampleValue::Null);
    }

    #[test]
    fn prop_cells_are_bounded_and_escaped(text in "(.|\n|\r|\\|){0,120}") {
        let cell = escape_cell(&text);
        let len = cell.chars().count();

        prop_assert!(len <= MAX_CELL_CHARS);
        if text.chars().count() > MAX_CELL_CHARS {
            prop_assert_eq!(len, MAX_CELL_CHARS);
        }
        prop_assert!(!cell.contains('\n'));
        prop_assert!(!cell.contains('\r'));

        // every pipe that survives truncation is escaped
        let chars: Vec<char> = cell.chars().collect();
        prop_assert!(!cell.starts_with('|'));
        for pair in chars.windows(2) {
            if pair[1] == '|' {
                prop_assert_eq!(pair[0], '\\');
            }
        }
    }

    #[test]
    fn prop_binary_cells_are_bounded(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let cell = format_sample_cell(&SampleValue::Bytes(bytes));
        prop_assert!(cell.chars().count() <= MAX_CELL_CHARS);
    }
}
