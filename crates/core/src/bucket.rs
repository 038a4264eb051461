use serde::{Deserialize, Serialize};
use std::fmt;

/// The allocation bucket an account line rolls into.
///
/// Wire form is snake_case (`gross_revenue`, `opex`, ...) and is shared by
/// serde, `Display`, and `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    GrossRevenue,
    MaterialsSubs,
    OwnerPay,
    Tax,
    #[serde(rename = "opex")]
    OpEx,
    Exclude,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::GrossRevenue,
        Bucket::MaterialsSubs,
        Bucket::OwnerPay,
        Bucket::Tax,
        Bucket::OpEx,
        Bucket::Exclude,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::GrossRevenue => "gross_revenue",
            Bucket::MaterialsSubs => "materials_subs",
            Bucket::OwnerPay => "owner_pay",
            Bucket::Tax => "tax",
            Bucket::OpEx => "opex",
            Bucket::Exclude => "exclude",
        }
    }

    /// Human-readable label for report output.
    pub fn label(self) -> &'static str {
        match self {
            Bucket::GrossRevenue => "Gross Revenue",
            Bucket::MaterialsSubs => "Materials & Subs",
            Bucket::OwnerPay => "Owner's Pay",
            Bucket::Tax => "Tax",
            Bucket::OpEx => "Operating Expenses",
            Bucket::Exclude => "Excluded",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gross_revenue" => Ok(Bucket::GrossRevenue),
            "materials_subs" => Ok(Bucket::MaterialsSubs),
            "owner_pay" => Ok(Bucket::OwnerPay),
            "tax" => Ok(Bucket::Tax),
            "opex" => Ok(Bucket::OpEx),
            "exclude" => Ok(Bucket::Exclude),
            other => Err(format!("Unknown bucket: '{other}'")),
        }
    }
}
