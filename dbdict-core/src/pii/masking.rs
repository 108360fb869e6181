//! Masking transforms and the [`PiiGuard`] entry point.
//!
//! Transforms work on the display form of a value and always return a
//! string. They keep a small hint of the original (first letter, last four
//! digits) and fall back to a bracketed literal when the input does not
//! have the expected shape.

use regex::Regex;
use std::sync::LazyLock;

use super::column::{PiiCategory, is_pii_column};
use super::content::{ContentKind, classify};
use crate::models::{SampleRow, SampleValue, TableSample};

#[allow(clippy::expect_used)]
static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("Invalid digit regex pattern"));

/// Replacement for credential columns.
pub const MASKED: &str = "[MASKED]";
/// Replacement for address columns.
pub const ADDRESS_MASKED: &str = "[ADDRESS MASKED]";
/// Replacement for salary-like columns.
pub const AMOUNT_MASKED: &str = "[AMOUNT MASKED]";
/// Replacement for flagged columns without a specific transform.
pub const PII_MASKED: &str = "[PII MASKED]";
/// Replacement for values containing a link.
pub const URL_MASKED: &str = "[URL MASKED]";

fn digits_only(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

fn last_chars(value: &str, count: usize) -> &str {
    let skip = value.chars().count().saturating_sub(count);
    value
        .char_indices()
        .nth(skip)
        .map_or("", |(index, _)| &value[index..])
}

fn first_char(value: &str) -> Option<char> {
    value.chars().next()
}

/// `john.doe@example.com` becomes `j***@e***.com`.
///
/// Anything without exactly one `@`, or with an empty local part or first
/// domain label, becomes `[EMAIL MASKED]`.
pub fn mask_email(value: &str) -> String {
    const FALLBACK: &str = "[EMAIL MASKED]";

    let mut parts = value.split('@');
    let (Some(user), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return FALLBACK.to_string();
    };

    let masked_domain = if domain.contains('.') {
        let first_label = domain.split('.').next().unwrap_or_default();
        let last_label = domain.rsplit('.').next().unwrap_or_default();
        first_char(first_label).map(|c| format!("{}***.{}", c, last_label))
    } else {
        first_char(domain).map(|c| format!("{}***", c))
    };

    match (first_char(user), masked_domain) {
        (Some(initial), Some(domain)) => format!("{}***@{}", initial, domain),
        _ => FALLBACK.to_string(),
    }
}

/// Keeps the last four digits: `555-123-4567` becomes `***-***-4567`.
pub fn mask_phone(value: &str) -> String {
    let digits = digits_only(value);
    if digits.chars().count() >= 4 {
        format!("***-***-{}", last_chars(&digits, 4))
    } else {
        "[PHONE MASKED]".to_string()
    }
}

/// Nine digits become `***-**-` plus the last four.
pub fn mask_ssn(value: &str) -> String {
    let digits = digits_only(value);
    if digits.chars().count() == 9 {
        format!("***-**-{}", last_chars(&digits, 4))
    } else {
        "[SSN MASKED]".to_string()
    }
}

/// Keeps the last four digits behind three masked groups.
pub fn mask_credit_card(value: &str) -> String {
    let digits = digits_only(value);
    if digits.chars().count() >= 4 {
        format!("****-****-****-{}", last_chars(&digits, 4))
    } else {
        "[CARD MASKED]".to_string()
    }
}

/// Keeps the last octet of a dotted quad.
pub fn mask_ip(value: &str) -> String {
    let parts: Vec<&str> = value.split('.').collect();
    match parts.as_slice() {
        [_, _, _, last] => format!("***.***.***.{}", last),
        _ => "[IP MASKED]".to_string(),
    }
}

fn mask_name_token(token: &str) -> Option<String> {
    if token.chars().count() > 1 {
        first_char(token).map(|c| format!("{}***", c))
    } else {
        None
    }
}

/// Masks each space-separated token to its initial: `John Doe` becomes
/// `J*** D***`.
///
/// Single-character tokens inside a multi-word name are left as they are.
/// The length check runs before trimming, so `" x "` is treated as a name.
pub fn mask_name(value: &str) -> String {
    const FALLBACK: &str = "[NAME MASKED]";

    if value.chars().count() < 2 {
        return FALLBACK.to_string();
    }

    let trimmed = value.trim();
    if trimmed.contains(' ') {
        trimmed
            .split(' ')
            .map(|token| mask_name_token(token).unwrap_or_else(|| token.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        mask_name_token(trimmed).unwrap_or_else(|| FALLBACK.to_string())
    }
}

impl PiiCategory {
    /// Applies the transform bound to this category.
    pub fn mask(self, value: &str) -> String {
        match self {
            Self::Email => mask_email(value),
            Self::Phone => mask_phone(value),
            Self::Ssn => mask_ssn(value),
            Self::Credential => MASKED.to_string(),
            Self::CreditCard => mask_credit_card(value),
            Self::Address => ADDRESS_MASKED.to_string(),
            Self::Name => mask_name(value),
            Self::Amount => AMOUNT_MASKED.to_string(),
            Self::Generic => PII_MASKED.to_string(),
        }
    }
}

impl ContentKind {
    /// Applies the transform bound to this content kind.
    pub fn mask(self, value: &str) -> String {
        match self {
            Self::Email => mask_email(value),
            Self::Phone => mask_phone(value),
            Self::Ssn => mask_ssn(value),
            Self::CreditCard => mask_credit_card(value),
            Self::IpAddress => mask_ip(value),
            Self::Url => URL_MASKED.to_string(),
        }
    }
}

/// Masks a single value for display.
///
/// A PII-flagged column name decides the transform regardless of content.
/// Otherwise the value's content picks it. NULL and values matching
/// neither heuristic come back unchanged.
///
/// Binary values are inspected as lossy UTF-8, not as their base64 display.
pub fn mask_value(value: &SampleValue, column_name: &str) -> SampleValue {
    let text = match value {
        SampleValue::Null => return SampleValue::Null,
        SampleValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        other => other.to_string(),
    };

    if is_pii_column(column_name) {
        return SampleValue::Text(PiiCategory::from_column_name(column_name).mask(&text));
    }

    match classify(&text) {
        Some(kind) => SampleValue::Text(kind.mask(&text)),
        None => value.clone(),
    }
}

/// A sample after masking, with the flagged column names.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectedSample {
    /// Masked rows in the original column order
    pub sample: TableSample,
    /// PII-flagged sample columns in first-seen order; empty without rows
    pub pii_columns: Vec<String>,
}

/// PII protection switch shared by the driver and the report.
///
/// When disabled every method is a pass-through: nothing is masked and no
/// column is reported as PII.
///
/// # Example
/// ```rust
/// use dbdict_core::models::SampleValue;
/// use dbdict_core::pii::PiiGuard;
///
/// let guard = PiiGuard::new(true);
/// let masked = guard.mask(&SampleValue::from("555-123-4567"), "contact_phone");
/// assert_eq!(masked, SampleValue::from("***-***-4567"));
///
/// let off = PiiGuard::new(false);
/// let raw = off.mask(&SampleValue::from("555-123-4567"), "contact_phone");
/// assert_eq!(raw, SampleValue::from("555-123-4567"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiiGuard {
    enabled: bool,
}

impl PiiGuard {
    /// Creates a guard.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether masking is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Name-based PII verdict; always false when disabled.
    pub fn is_pii_column(&self, column_name: &str) -> bool {
        self.enabled && is_pii_column(column_name)
    }

    /// Masks one value, or clones it when protection is off.
    pub fn mask(&self, value: &SampleValue, column_name: &str) -> SampleValue {
        if self.enabled {
            mask_value(value, column_name)
        } else {
            value.clone()
        }
    }

    /// Flagged names among `columns`, in the given order.
    pub fn flagged_columns<'a, I>(&self, columns: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        columns
            .into_iter()
            .filter(|name| self.is_pii_column(name))
            .map(str::to_string)
            .collect()
    }

    /// Masks every cell of a sample.
    ///
    /// Cells are matched to column names by position.
    pub fn protect_sample(&self, sample: TableSample) -> ProtectedSample {
        if !self.enabled {
            return ProtectedSample {
                sample,
                pii_columns: Vec::new(),
            };
        }

        let mut pii_columns: Vec<String> = Vec::new();
        let rows: Vec<SampleRow> = sample
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&sample.columns)
                    .map(|(value, column)| {
                        if is_pii_column(column) && !pii_columns.contains(column) {
                            pii_columns.push(column.clone());
                        }
                        mask_value(value, column)
                    })
                    .collect::<SampleRow>()
            })
            .collect();

        ProtectedSample {
            sample: TableSample { rows, ..sample },
            pii_columns,
        }
    }
}
