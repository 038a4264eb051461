use std::collections::HashSet;

use rust_decimal::Decimal;

use prorata_core::LineItem;

/// Kept uniques (first occurrence, original order) and exact repeats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupSplit {
    pub unique: Vec<LineItem>,
    pub duplicates: Vec<LineItem>,
}

/// Split items on (case-folded trimmed name, exact amount). The same name
/// with a different amount is a distinct account line, not a duplicate.
pub fn split_duplicates(items: Vec<LineItem>) -> DedupSplit {
    let mut seen: HashSet<(String, Decimal)> = HashSet::new();
    let mut split = DedupSplit::default();
    for item in items {
        let key = (item.account_name.trim().to_lowercase(), item.amount.normalize());
        if seen.insert(key) {
            split.unique.push(item);
        } else {
            split.duplicates.push(item);
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use prorata_core::{Bucket, Confidence};

    fn item(name: &str, amount: &str) -> LineItem {
        LineItem {
            account_name: name.to_string(),
            amount: amount.parse().unwrap(),
            parent_account: None,
            suggested: Bucket::OpEx,
            confidence: Confidence::Low,
            needs_review: None,
            sort_order: 0,
        }
    }

    #[test]
    fn exact_repeats_split_out() {
        let split = split_duplicates(vec![
            item("Rent", "500"),
            item("Rent", "500"),
            item("Rent", "600"),
        ]);
        assert_eq!(split.unique.len(), 2);
        assert_eq!(split.duplicates.len(), 1);
        assert_eq!(split.unique[0].amount, split.duplicates[0].amount);
        assert_eq!(split.unique[1].amount, "600".parse().unwrap());
    }

    #[test]
    fn name_folding_is_case_and_whitespace_insensitive() {
        let split = split_duplicates(vec![item("Rent", "500"), item("  RENT ", "500")]);
        assert_eq!(split.unique.len(), 1);
        assert_eq!(split.duplicates.len(), 1);
    }

    #[test]
    fn amount_scale_does_not_matter() {
        let split = split_duplicates(vec![item("Rent", "500"), item("Rent", "500.00")]);
        assert_eq!(split.unique.len(), 1);
    }

    #[test]
    fn first_occurrence_order_is_preserved() {
        let split = split_duplicates(vec![
            item("Rent", "500"),
            item("Utilities", "120"),
            item("Rent", "500"),
            item("Insurance", "80"),
        ]);
        let names: Vec<&str> =
            split.unique.iter().map(|i| i.account_name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Utilities", "Insurance"]);
    }

    #[test]
    fn empty_input_is_empty_split() {
        let split = split_duplicates(vec![]);
        assert!(split.unique.is_empty());
        assert!(split.duplicates.is_empty());
    }
}
