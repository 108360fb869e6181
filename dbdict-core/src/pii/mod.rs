//! PII detection and masking.
//!
//! Two independent heuristics decide whether a sampled value is sensitive:
//!
//! - [`is_pii_column`] flags a column by name, using substring patterns
//! - [`classify`] flags a single value by its shape (email, phone, SSN, card, IP, URL)
//!
//! A name match always wins and picks a [`PiiCategory`] transform; otherwise
//! a content match picks the [`ContentKind`] transform. [`PiiGuard`] wraps
//! both behind the run-wide protection switch.

mod column;
mod content;
mod masking;

pub use column::{PII_COLUMN_PATTERNS, PiiCategory, is_pii_column};
pub use content::{ContentKind, classify};
pub use masking::{
    ADDRESS_MASKED, AMOUNT_MASKED, MASKED, PII_MASKED, PiiGuard, ProtectedSample, URL_MASKED,
    mask_credit_card, mask_email, mask_ip, mask_name, mask_phone, mask_ssn, mask_value,
};
