use prorata_core::{Bucket, Confidence};

use crate::rules::{RuleSet, HIGH_CONFIDENCE_PRIORITY};

/// Account phrases that can hide owner compensation inside ordinary-looking
/// expense accounts. Flagged whenever the suggested bucket is not owner pay.
const REVIEW_KEYWORDS: &[&str] = &[
    "professional fee",
    "contractor",
    "consultant",
    "distribution",
    "1099",
    "management fee",
    "advisory",
];

const REVIEW_NOTE: &str = "may include owner compensation; review before allocating";

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub bucket: Bucket,
    pub confidence: Confidence,
    pub needs_review: Option<String>,
}

/// Suggest a bucket for an account name. Total function: the first matching
/// rule wins (rules are in priority order), and an unmatched name defaults
/// to operating expenses at low confidence.
pub fn classify(account_name: &str, rules: &RuleSet) -> Classification {
    let name = account_name.trim().to_lowercase();

    let (bucket, confidence) = rules
        .rules()
        .iter()
        .find(|rule| name.contains(rule.keyword.as_str()))
        .map(|rule| {
            let confidence = if rule.priority >= HIGH_CONFIDENCE_PRIORITY {
                Confidence::High
            } else {
                Confidence::Low
            };
            (rule.bucket, confidence)
        })
        .unwrap_or((Bucket::OpEx, Confidence::Low));

    let needs_review = (bucket != Bucket::OwnerPay
        && REVIEW_KEYWORDS.iter().any(|kw| name.contains(kw)))
    .then(|| REVIEW_NOTE.to_string());

    Classification { bucket, confidence, needs_review }
}
