//! Value-shape heuristics.
//!
//! Each [`ContentKind`] owns one regex. Patterns are searched (not anchored)
//! and tried in declaration order, so `"contact jane@x.com"` is an email.

use regex::Regex;
use std::sync::LazyLock;

// Pattern literals are fixed, so construction cannot fail at runtime.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
        .expect("Invalid email regex pattern")
});

#[allow(clippy::expect_used)]
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b")
        .expect("Invalid phone regex pattern")
});

#[allow(clippy::expect_used)]
static SSN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{3}-\d{2}-\d{4}\b|\b\d{9}\b")
        .expect("Invalid SSN regex pattern")
});

#[allow(clippy::expect_used)]
static CREDIT_CARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{4}[-\s]?){3}\d{4}\b")
        .expect("Invalid credit card regex pattern")
});

#[allow(clippy::expect_used)]
static IP_ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b")
        .expect("Invalid IP address regex pattern")
});

#[allow(clippy::expect_used)]
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .expect("Invalid URL regex pattern")
});

/// Recognized shapes of PII-bearing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `user@domain.tld`
    Email,
    /// US-style ten digit number, optional `+1` prefix
    Phone,
    /// `###-##-####` or nine bare digits
    Ssn,
    /// Four groups of four digits
    CreditCard,
    /// Dotted quad
    IpAddress,
    /// `http://` or `https://` link
    Url,
}

impl ContentKind {
    /// All kinds in trial order.
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Email,
        ContentKind::Phone,
        ContentKind::Ssn,
        ContentKind::CreditCard,
        ContentKind::IpAddress,
        ContentKind::Url,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Email => &EMAIL_PATTERN,
            Self::Phone => &PHONE_PATTERN,
            Self::Ssn => &SSN_PATTERN,
            Self::CreditCard => &CREDIT_CARD_PATTERN,
            Self::IpAddress => &IP_ADDRESS_PATTERN,
            Self::Url => &URL_PATTERN,
        }
    }

    /// True when the pattern for this kind occurs anywhere in `value`.
    pub fn matches(self, value: &str) -> bool {
        self.pattern().is_match(value)
    }
}

/// Returns the first content kind whose pattern occurs in `value`.
///
/// # Example
/// ```rust
/// use dbdict_core::pii::{ContentKind, classify};
///
/// assert_eq!(classify("reach me at jane@x.com"), Some(ContentKind::Email));
/// assert_eq!(classify("order shipped"), None);
/// ```
pub fn classify(value: &str) -> Option<ContentKind> {
    ContentKind::ALL
        .into_iter()
        .find(|kind| kind.matches(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_kind() {
        let cases = [
            ("john.doe@example.com", ContentKind::Email),
            ("555-123-4567", ContentKind::Phone),
            ("+1 (555) 123-4567", ContentKind::Phone),
            ("123-45-6789", ContentKind::Ssn),
            ("123456789", ContentKind::Ssn),
            ("4111111111111111", ContentKind::CreditCard),
            ("4111-1111-1111-1111", ContentKind::CreditCard),
            ("192.168.1.100", ContentKind::IpAddress),
            ("https://example.com/path?q=1", ContentKind::Url),
            ("see http://intranet/wiki", ContentKind::Url),
        ];

        for (value, expected) in cases {
            assert_eq!(classify(value), Some(expected), "Failed for value={}", value);
        }
    }

    #[test]
    fn test_classify_searches_inside_text() {
        assert_eq!(classify("contact jane@x.com"), Some(ContentKind::Email));
        assert_eq!(classify("call 555.123.4567 after 5"), Some(ContentKind::Phone));
    }

    #[test]
    fn test_email_wins_over_url() {
        assert_eq!(
            classify("https://example.com/?contact=ops@example.com"),
            Some(ContentKind::Email)
        );
    }

    #[test]
    fn test_classify_plain_values() {
        for value in ["", "active", "42", "12.50", "2024-01-02", "ftp://files", "not-an-email"] {
            assert_eq!(classify(value), None, "Failed for value={}", value);
        }
    }
}
