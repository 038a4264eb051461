use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use thiserror::Error;

use prorata_core::{AccountMapping, Bucket, BucketTotals, LineItem};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown account: '{0}'")]
    UnknownAccount(String),
}

/// Review state between import and allocation: the imported items and the
/// bucket currently assigned to each account.
#[derive(Debug, Clone)]
pub struct MappingSession {
    items: Vec<LineItem>,
    mapping: HashMap<String, Bucket>,
    modified: HashSet<String>,
}

/// Result of committing a session.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingOutcome {
    pub mappings: Vec<AccountMapping>,
    pub totals: BucketTotals,
    pub real_revenue: Decimal,
}

impl MappingSession {
    /// Seed from imported items, preferring the bucket an account was given
    /// last time over the fresh suggestion. The lookup is exact, including
    /// case.
    pub fn seed(items: Vec<LineItem>, previous: &HashMap<String, Bucket>) -> Self {
        let mapping = items
            .iter()
            .map(|item| {
                let bucket = previous.get(&item.account_name).copied().unwrap_or(item.suggested);
                (item.account_name.clone(), bucket)
            })
            .collect();
        Self { items, mapping, modified: HashSet::new() }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn bucket_for(&self, account: &str) -> Option<Bucket> {
        self.mapping.get(account).copied()
    }

    /// True once the account has been touched by `set_bucket`, even if it
    /// was set back to the original suggestion.
    pub fn is_modified(&self, account: &str) -> bool {
        self.modified.contains(account)
    }

    pub fn set_bucket(&mut self, account: &str, bucket: Bucket) -> Result<(), SessionError> {
        if !self.mapping.contains_key(account) {
            return Err(SessionError::UnknownAccount(account.to_string()));
        }
        self.mapping.insert(account.to_string(), bucket);
        self.modified.insert(account.to_string());
        Ok(())
    }

    /// Commit the session: mappings in item order, totals per bucket, and
    /// the real-revenue figure the allocation step starts from.
    pub fn apply(&self) -> MappingOutcome {
        let mut totals = BucketTotals::default();
        let mappings: Vec<AccountMapping> = self
            .items
            .iter()
            .map(|item| {
                let bucket = self.bucket_for(&item.account_name).unwrap_or(item.suggested);
                totals.add(bucket, item.amount);
                AccountMapping {
                    account_name: item.account_name.clone(),
                    amount: item.amount,
                    parent_account: item.parent_account.clone(),
                    bucket,
                    sort_order: item.sort_order,
                    was_modified: self.is_modified(&item.account_name),
                }
            })
            .collect();
        MappingOutcome { mappings, totals, real_revenue: totals.real_revenue() }
    }
}
