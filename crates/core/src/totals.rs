use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bucket::Bucket;

/// Per-bucket sums over the kept, deduplicated line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketTotals {
    pub gross_revenue: Decimal,
    pub materials_subs: Decimal,
    pub owner_pay: Decimal,
    pub tax: Decimal,
    pub opex: Decimal,
    pub exclude: Decimal,
}

impl BucketTotals {
    pub fn add(&mut self, bucket: Bucket, amount: Decimal) {
        match bucket {
            Bucket::GrossRevenue => self.gross_revenue += amount,
            Bucket::MaterialsSubs => self.materials_subs += amount,
            Bucket::OwnerPay => self.owner_pay += amount,
            Bucket::Tax => self.tax += amount,
            Bucket::OpEx => self.opex += amount,
            Bucket::Exclude => self.exclude += amount,
        }
    }

    pub fn get(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::GrossRevenue => self.gross_revenue,
            Bucket::MaterialsSubs => self.materials_subs,
            Bucket::OwnerPay => self.owner_pay,
            Bucket::Tax => self.tax,
            Bucket::OpEx => self.opex,
            Bucket::Exclude => self.exclude,
        }
    }

    /// Revenue left after materials and subcontractors. Materials are taken
    /// by magnitude so exports that store costs as negatives agree with ones
    /// that store them as positives.
    pub fn real_revenue(&self) -> Decimal {
        self.gross_revenue - self.materials_subs.abs()
    }

    /// Sum of the expense-side buckets, materials by magnitude.
    pub fn total_expenses(&self) -> Decimal {
        self.materials_subs.abs() + self.owner_pay + self.tax + self.opex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn add_and_get_cover_every_bucket() {
        let mut totals = BucketTotals::default();
        for (i, bucket) in Bucket::ALL.into_iter().enumerate() {
            totals.add(bucket, Decimal::from(i as i64 + 1));
        }
        for (i, bucket) in Bucket::ALL.into_iter().enumerate() {
            assert_eq!(totals.get(bucket), Decimal::from(i as i64 + 1));
        }
    }

    #[test]
    fn real_revenue_ignores_materials_sign() {
        let positive = BucketTotals { gross_revenue: d("450000"), materials_subs: d("120000"), ..Default::default() };
        let negative = BucketTotals { gross_revenue: d("450000"), materials_subs: d("-120000"), ..Default::default() };
        assert_eq!(positive.real_revenue(), d("330000"));
        assert_eq!(negative.real_revenue(), d("330000"));
    }

    #[test]
    fn total_expenses_sums_expense_buckets() {
        let totals = BucketTotals {
            gross_revenue: d("450000"),
            materials_subs: d("-120000"),
            owner_pay: d("85000"),
            tax: d("30000"),
            opex: d("24000"),
            exclude: d("9999"),
        };
        assert_eq!(totals.total_expenses(), d("259000"));
    }
}
