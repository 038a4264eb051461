use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::bucket::Bucket;

/// How sure the classifier is about a suggested bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// One account line parsed out of a P&L export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Trimmed, non-empty account name as it appeared in the source.
    pub account_name: String,
    /// Amount with the sign the source carried.
    pub amount: Decimal,
    /// Section header this row appeared under, if any.
    pub parent_account: Option<String>,
    pub suggested: Bucket,
    pub confidence: Confidence,
    /// Caution for accounts that may hide owner compensation.
    pub needs_review: Option<String>,
    /// Original parse order; counts only emitted rows.
    pub sort_order: u32,
}

/// A confirmed account assignment produced by a mapping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountMapping {
    pub account_name: String,
    pub amount: Decimal,
    pub parent_account: Option<String>,
    pub bucket: Bucket,
    pub sort_order: u32,
    /// True iff the user issued a set for this account during the session,
    /// regardless of whether the value changed.
    pub was_modified: bool,
}
