//! Column-name heuristics.

/// Substrings that flag a lower-cased column name as PII-likely.
///
/// Matching is plain `contains`, so short entries such as `key`, `pass`,
/// `tel` and `age` also flag names like `monkey`, `passed_at`, `hotel` and
/// `page`.
pub const PII_COLUMN_PATTERNS: &[&str] = &[
    // contact
    "email",
    "mail",
    "e_mail",
    "phone",
    "mobile",
    "tel",
    "fax",
    // government identity
    "ssn",
    "social_security",
    "tax_id",
    "passport",
    "visa",
    "identity",
    "license",
    "licence",
    "dl_number",
    // financial
    "credit_card",
    "card_number",
    "cc_num",
    "salary",
    "wage",
    "income",
    "earning",
    "account",
    "routing",
    "iban",
    "swift",
    // credentials
    "password",
    "passwd",
    "pwd",
    "pass",
    "token",
    "key",
    "secret",
    "api_key",
    "signature",
    "fingerprint",
    "hash",
    // personal names
    "first_name",
    "last_name",
    "full_name",
    "fname",
    "lname",
    "maiden",
    "middle_name",
    "nickname",
    // location
    "address",
    "addr",
    "street",
    "zip",
    "postal",
    // demographic
    "dob",
    "birth",
    "birthday",
    "age",
    // network and device
    "ip_address",
    "ip_addr",
    "user_agent",
];

/// Returns true when the column name contains any PII pattern.
///
/// Comparison is case-insensitive.
///
/// # Example
/// ```rust
/// use dbdict_core::pii::is_pii_column;
///
/// assert!(is_pii_column("Customer_Email"));
/// assert!(!is_pii_column("created_at"));
/// ```
pub fn is_pii_column(column_name: &str) -> bool {
    let lower = column_name.to_lowercase();
    PII_COLUMN_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Masking category chosen from a PII-flagged column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiCategory {
    /// `email`, `mail`
    Email,
    /// `phone`, `mobile`, `tel`
    Phone,
    /// `ssn`, `social_security`
    Ssn,
    /// `password`, `passwd`, `pwd`, `pass`
    Credential,
    /// `credit_card`, `card_number`
    CreditCard,
    /// `address`, `street`
    Address,
    /// `name`, `fname`, `lname`
    Name,
    /// `salary`, `wage`, `income`
    Amount,
    /// Flagged by name but matching no category keyword
    Generic,
}

/// Category keywords, checked in order; the first hit wins.
const CATEGORY_KEYWORDS: &[(PiiCategory, &[&str])] = &[
    (PiiCategory::Email, &["email", "mail"]),
    (PiiCategory::Phone, &["phone", "mobile", "tel"]),
    (PiiCategory::Ssn, &["ssn", "social_security"]),
    (PiiCategory::Credential, &["password", "passwd", "pwd", "pass"]),
    (PiiCategory::CreditCard, &["credit_card", "card_number"]),
    (PiiCategory::Address, &["address", "street"]),
    (PiiCategory::Name, &["name", "fname", "lname"]),
    (PiiCategory::Amount, &["salary", "wage", "income"]),
];

impl PiiCategory {
    /// Picks the masking category for a column name.
    ///
    /// Callers are expected to have checked [`is_pii_column`] first; any
    /// name outside the keyword table maps to [`PiiCategory::Generic`].
    pub fn from_column_name(column_name: &str) -> Self {
        let lower = column_name.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
            .map(|(category, _)| *category)
            .unwrap_or(Self::Generic)
    }
}
