use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use prorata_core::money::{pct, usd};
use prorata_core::{Bucket, BucketTotals, Quarter};

/// Target percentages of real revenue for each allocation category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationTargets {
    pub profit: Decimal,
    pub owner_pay: Decimal,
    pub tax: Decimal,
    pub opex: Decimal,
}

impl Default for AllocationTargets {
    fn default() -> Self {
        Self {
            profit: Decimal::from(5),
            owner_pay: Decimal::from(50),
            tax: Decimal::from(15),
            opex: Decimal::from(30),
        }
    }
}

impl AllocationTargets {
    fn for_category(&self, category: AllocationCategory) -> Decimal {
        match category {
            AllocationCategory::Profit => self.profit,
            AllocationCategory::OwnerPay => self.owner_pay,
            AllocationCategory::Tax => self.tax,
            AllocationCategory::OpEx => self.opex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationCategory {
    Profit,
    OwnerPay,
    Tax,
    #[serde(rename = "opex")]
    OpEx,
}

impl AllocationCategory {
    pub const ALL: [AllocationCategory; 4] = [
        AllocationCategory::Profit,
        AllocationCategory::OwnerPay,
        AllocationCategory::Tax,
        AllocationCategory::OpEx,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AllocationCategory::Profit => "Profit",
            AllocationCategory::OwnerPay => "Owner's Pay",
            AllocationCategory::Tax => "Tax",
            AllocationCategory::OpEx => "Operating Expenses",
        }
    }

    /// Operating expenses grade in reverse: spending under target is good.
    fn lower_is_better(self) -> bool {
        matches!(self, AllocationCategory::OpEx)
    }
}

/// Traffic-light reading of a category's gap to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    Good,
    Warning,
    Danger,
}

impl GapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GapStatus::Good => "good",
            GapStatus::Warning => "warning",
            GapStatus::Danger => "danger",
        }
    }
}

impl fmt::Display for GapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory note attached to a plan when a gap crosses a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub severity: Severity,
    pub category: AllocationCategory,
    pub message: String,
}

/// Year-to-date figures the allocation math runs on. `from_totals` bridges
/// from committed bucket totals; the fields can also be supplied directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YtdFigures {
    pub revenue: Decimal,
    pub profit: Decimal,
    pub owner_draw: Decimal,
    pub tax_paid: Decimal,
    pub total_expenses: Decimal,
    pub cogs: Decimal,
}

impl YtdFigures {
    pub fn from_totals(totals: &BucketTotals) -> Self {
        let revenue = totals.get(Bucket::GrossRevenue);
        let total_expenses = totals.total_expenses();
        YtdFigures {
            revenue,
            profit: revenue - total_expenses,
            owner_draw: totals.get(Bucket::OwnerPay),
            tax_paid: totals.get(Bucket::Tax),
            total_expenses,
            cogs: totals.get(Bucket::MaterialsSubs).abs(),
        }
    }
}

/// One category's slice of the plan: the transfer schedule toward its
/// target, and how far current spending sits from that target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPlan {
    pub category: AllocationCategory,
    pub target_pct: Decimal,
    /// Dollars to move on each twice-monthly transfer.
    pub transfer: Decimal,
    pub annualized: Decimal,
    pub current_pct: Decimal,
    /// Current percentage minus target; negative means under target.
    pub gap: Decimal,
    pub status: GapStatus,
    pub twelve_month_impact: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub months_in_data: u32,
    pub monthly_revenue: Decimal,
    pub annual_revenue: Decimal,
    pub per_transfer: Decimal,
    pub real_revenue: Decimal,
    pub monthly_real_revenue: Decimal,
    pub annual_real_revenue: Decimal,
    pub categories: Vec<CategoryPlan>,
    pub insights: Vec<Insight>,
}

/// Computes transfer schedules and gap analysis from year-to-date figures.
pub struct AllocationCalculator {
    targets: AllocationTargets,
    quarter: Quarter,
    months_override: Option<u32>,
}

impl AllocationCalculator {
    pub fn new(targets: AllocationTargets, quarter: Quarter) -> Self {
        Self { targets, quarter, months_override: None }
    }

    /// Use an explicit month count instead of three per elapsed quarter.
    pub fn with_months(mut self, months: u32) -> Self {
        self.months_override = Some(months);
        self
    }

    pub fn plan(&self, ytd: &YtdFigures) -> AllocationPlan {
        let months = self.months_override.unwrap_or_else(|| self.quarter.months_elapsed());
        let per_month = |total: Decimal| {
            if months == 0 {
                Decimal::ZERO
            } else {
                total / Decimal::from(months)
            }
        };

        let monthly_revenue = per_month(ytd.revenue);
        let annual_revenue = monthly_revenue * Decimal::from(12);
        let per_transfer = monthly_revenue / Decimal::from(2);

        let real_revenue = ytd.revenue - ytd.cogs.abs();
        let monthly_real_revenue = per_month(real_revenue);
        // Annualized from the same month base as everything else, so an
        // explicit month override moves every figure together.
        let annual_real_revenue = monthly_real_revenue * Decimal::from(12);

        let categories: Vec<CategoryPlan> = AllocationCategory::ALL
            .iter()
            .map(|&category| {
                let target_pct = self.targets.for_category(category);
                let transfer = per_transfer * target_pct / Decimal::ONE_HUNDRED;
                let current = current_amount(category, ytd);
                let current_pct = if real_revenue > Decimal::ZERO {
                    current / real_revenue * Decimal::ONE_HUNDRED
                } else {
                    Decimal::ZERO
                };
                let gap = current_pct - target_pct;
                CategoryPlan {
                    category,
                    target_pct,
                    transfer,
                    annualized: transfer * Decimal::from(24),
                    current_pct,
                    gap,
                    status: status_for(category, gap),
                    twelve_month_impact: gap / Decimal::ONE_HUNDRED * annual_real_revenue,
                }
            })
            .collect();

        let insights = build_insights(&categories);

        AllocationPlan {
            months_in_data: months,
            monthly_revenue,
            annual_revenue,
            per_transfer,
            real_revenue,
            monthly_real_revenue,
            annual_real_revenue,
            categories,
            insights,
        }
    }
}

/// Year-to-date dollars currently landing in a category. Operating expenses
/// are whatever remains of total expenses after direct costs, owner draw,
/// and tax, floored at zero.
fn current_amount(category: AllocationCategory, ytd: &YtdFigures) -> Decimal {
    match category {
        AllocationCategory::Profit => ytd.profit,
        AllocationCategory::OwnerPay => ytd.owner_draw,
        AllocationCategory::Tax => ytd.tax_paid,
        AllocationCategory::OpEx => {
            (ytd.total_expenses - ytd.cogs.abs() - ytd.owner_draw - ytd.tax_paid)
                .max(Decimal::ZERO)
        }
    }
}

fn status_for(category: AllocationCategory, gap: Decimal) -> GapStatus {
    let two = Decimal::from(2);
    let five = Decimal::from(5);
    if category.lower_is_better() {
        if gap <= two {
            GapStatus::Good
        } else if gap <= five {
            GapStatus::Warning
        } else {
            GapStatus::Danger
        }
    } else if gap >= -two {
        GapStatus::Good
    } else if gap >= -five {
        GapStatus::Warning
    } else {
        GapStatus::Danger
    }
}

fn build_insights(categories: &[CategoryPlan]) -> Vec<Insight> {
    let five = Decimal::from(5);
    let find = |cat: AllocationCategory| categories.iter().find(|c| c.category == cat);
    let mut insights = Vec::new();

    if let Some(p) = find(AllocationCategory::Profit) {
        if p.gap < -five {
            insights.push(Insight {
                severity: Severity::Danger,
                category: AllocationCategory::Profit,
                message: format!(
                    "Profit is running {} below target, roughly {} over twelve months. \
                     Review pricing and recurring costs before quarter close.",
                    pct(p.gap.abs()),
                    usd(p.twelve_month_impact.abs()),
                ),
            });
        }
    }
    if let Some(o) = find(AllocationCategory::OwnerPay) {
        if o.gap < -five {
            insights.push(Insight {
                severity: Severity::Warning,
                category: AllocationCategory::OwnerPay,
                message: format!(
                    "Owner's pay is {} below target, about {} a year. Paying yourself \
                     too little hides the true cost of your labor and invites questions \
                     about reasonable compensation.",
                    pct(o.gap.abs()),
                    usd(o.twelve_month_impact.abs()),
                ),
            });
        }
        if o.gap > five {
            insights.push(Insight {
                severity: Severity::Info,
                category: AllocationCategory::OwnerPay,
                message: format!(
                    "Owner's pay is {} above target, about {} a year. Shifting some of \
                     it to distributions could trim payroll tax.",
                    pct(o.gap),
                    usd(o.twelve_month_impact.abs()),
                ),
            });
        }
    }
    if let Some(t) = find(AllocationCategory::Tax) {
        if t.gap < -five {
            insights.push(Insight {
                severity: Severity::Warning,
                category: AllocationCategory::Tax,
                message: format!(
                    "Tax reserve is {} below target, about {} short over twelve months. \
                     Top it up before estimates come due.",
                    pct(t.gap.abs()),
                    usd(t.twelve_month_impact.abs()),
                ),
            });
        }
    }
    if let Some(x) = find(AllocationCategory::OpEx) {
        if x.gap > five {
            insights.push(Insight {
                severity: Severity::Danger,
                category: AllocationCategory::OpEx,
                message: format!(
                    "Operating expenses are {} over target, about {} a year. Audit \
                     subscriptions and overhead for cuts.",
                    pct(x.gap),
                    usd(x.twelve_month_impact.abs()),
                ),
            });
        }
    }

    insights
}
