use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use prorata_core::Bucket;
use prorata_plan::AllocationTargets;

/// Optional TOML profile: allocation targets, reporting period, and bucket
/// assignments remembered from earlier imports.
///
/// ```toml
/// quarter = 2
///
/// [targets]
/// owner_pay = 40
///
/// [previous_mappings]
/// "Shop Rent" = "opex"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub targets: AllocationTargets,
    pub quarter: Option<u8>,
    pub months: Option<u32>,
    pub previous_mappings: HashMap<String, Bucket>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading profile {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing profile {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn full_profile_parses() {
        let text = r#"
            quarter = 2
            months = 5

            [targets]
            profit = 10
            owner_pay = 40

            [previous_mappings]
            "Shop Rent" = "opex"
            "Sales" = "gross_revenue"
        "#;
        let profile: Profile = toml::from_str(text).unwrap();
        assert_eq!(profile.quarter, Some(2));
        assert_eq!(profile.months, Some(5));
        assert_eq!(profile.targets.profit, Decimal::from(10));
        assert_eq!(profile.targets.owner_pay, Decimal::from(40));
        assert_eq!(profile.targets.tax, Decimal::from(15));
        assert_eq!(profile.previous_mappings.get("Shop Rent"), Some(&Bucket::OpEx));
        assert_eq!(profile.previous_mappings.get("Sales"), Some(&Bucket::GrossRevenue));
    }

    #[test]
    fn empty_profile_is_all_defaults() {
        let profile: Profile = toml::from_str("").unwrap();
        assert_eq!(profile.quarter, None);
        assert_eq!(profile.months, None);
        assert_eq!(profile.targets, AllocationTargets::default());
        assert!(profile.previous_mappings.is_empty());
    }
}
