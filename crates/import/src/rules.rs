use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use prorata_core::Bucket;

/// Matches at or above this priority are high confidence.
pub const HIGH_CONFIDENCE_PRIORITY: i32 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Lowercased substring matched against the account name.
    pub keyword: String,
    pub bucket: Bucket,
    pub priority: i32,
}

/// Loosely typed rule record as read from TOML/JSON, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    pub keyword: String,
    pub category: String,
    #[serde(default)]
    pub priority: Option<i32>,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule keyword is empty")]
    EmptyKeyword,
    #[error("unknown category '{category}' for keyword '{keyword}'")]
    UnknownCategory { keyword: String, category: String },
    #[error("failed to parse TOML rules: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON rules: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keyword rules sorted by priority, highest first.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<RawRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let mut rules: Vec<CategoryRule> = rules
            .into_iter()
            .map(|mut rule| {
                rule.keyword = rule.keyword.trim().to_lowercase();
                rule
            })
            .collect();
        // Highest priority first; stable sort keeps input order on ties.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { rules }
    }

    /// Validate loosely typed records into a rule set. Missing priority
    /// defaults to 0.
    pub fn from_records(records: Vec<RawRule>) -> Result<Self, RuleError> {
        let mut rules = Vec::with_capacity(records.len());
        for raw in records {
            let keyword = raw.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(RuleError::EmptyKeyword);
            }
            let bucket = Bucket::from_str(&raw.category).map_err(|_| RuleError::UnknownCategory {
                keyword: keyword.clone(),
                category: raw.category.clone(),
            })?;
            rules.push(CategoryRule { keyword, bucket, priority: raw.priority.unwrap_or(0) });
        }
        Ok(Self::new(rules))
    }

    /// `[[rule]]` array-of-tables TOML.
    pub fn from_toml(content: &str) -> Result<Self, RuleError> {
        let file: RuleFile = toml::from_str(content)?;
        Self::from_records(file.rule)
    }

    /// JSON array of rule records.
    pub fn from_json(content: &str) -> Result<Self, RuleError> {
        let records: Vec<RawRule> = serde_json::from_str(content)?;
        Self::from_records(records)
    }

    /// The starter catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_RULES
                .iter()
                .map(|&(keyword, bucket, priority)| CategoryRule {
                    keyword: keyword.to_string(),
                    bucket,
                    priority,
                })
                .collect(),
        )
    }

    /// Rules in match order (priority descending).
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Priorities express specificity: multi-word keywords must outrank their
/// generic substrings ("income tax" over "income", "payroll tax" over
/// "payroll"), or the generic rule would shadow them.
pub const BUILTIN_RULES: &[(&str, Bucket, i32)] = &[
    // Tax
    ("income tax", Bucket::Tax, 99),
    ("estimated tax", Bucket::Tax, 98),
    ("payroll tax", Bucket::Tax, 97),
    ("sales tax", Bucket::Tax, 96),
    ("franchise tax", Bucket::Tax, 95),
    ("tax", Bucket::Tax, 90),
    // Materials & subcontractors
    ("cost of goods", Bucket::MaterialsSubs, 98),
    ("cogs", Bucket::MaterialsSubs, 97),
    ("subcontract", Bucket::MaterialsSubs, 95),
    ("direct labor", Bucket::MaterialsSubs, 93),
    ("materials", Bucket::MaterialsSubs, 92),
    ("job supplies", Bucket::MaterialsSubs, 91),
    // Owner compensation
    ("owner", Bucket::OwnerPay, 96),
    ("officer", Bucket::OwnerPay, 94),
    ("guaranteed payment", Bucket::OwnerPay, 93),
    ("draw", Bucket::OwnerPay, 92),
    // Revenue
    ("revenue", Bucket::GrossRevenue, 94),
    ("sales", Bucket::GrossRevenue, 91),
    ("income", Bucket::GrossRevenue, 90),
    // Operating expenses
    ("rent", Bucket::OpEx, 90),
    ("payroll", Bucket::OpEx, 90),
    ("utilities", Bucket::OpEx, 85),
    ("wages", Bucket::OpEx, 85),
    ("insurance", Bucket::OpEx, 82),
    ("software", Bucket::OpEx, 80),
    ("subscription", Bucket::OpEx, 80),
    ("marketing", Bucket::OpEx, 80),
    ("advertising", Bucket::OpEx, 80),
    ("travel", Bucket::OpEx, 75),
    ("meals", Bucket::OpEx, 75),
    ("office", Bucket::OpEx, 72),
    ("supplies", Bucket::OpEx, 70),
    ("legal", Bucket::OpEx, 70),
    ("accounting", Bucket::OpEx, 70),
    ("bank", Bucket::OpEx, 65),
    ("professional", Bucket::OpEx, 65),
    // Non-cash and balance-sheet noise
    ("depreciation", Bucket::Exclude, 93),
    ("amortization", Bucket::Exclude, 93),
    ("transfer", Bucket::Exclude, 85),
];

/// Session-scoped rule cache. The fetch closure runs at most once; a failure
/// is recorded and an empty set takes its place, so classification degrades
/// to the no-match default instead of blocking the import.
#[derive(Debug, Default)]
pub struct RuleCache {
    rules: Option<RuleSet>,
    fetch_error: Option<String>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.rules.is_some()
    }

    pub fn fetch_failed(&self) -> bool {
        self.fetch_error.is_some()
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn get_or_fetch<F, E>(&mut self, fetch: F) -> &RuleSet
    where
        F: FnOnce() -> Result<RuleSet, E>,
        E: std::fmt::Display,
    {
        if self.rules.is_none() {
            match fetch() {
                Ok(rules) => self.rules = Some(rules),
                Err(e) => {
                    self.fetch_error = Some(e.to_string());
                    self.rules = Some(RuleSet::default());
                }
            }
        }
        self.rules.get_or_insert_with(RuleSet::default)
    }
}
