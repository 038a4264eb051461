use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use prorata_core::money::{pct, usd};
use prorata_core::{Bucket, Confidence};
use prorata_import::ImportBatch;
use prorata_plan::{AllocationPlan, GapStatus, MappingOutcome, Severity};

/// Parse notes and side lists: what was read and what was set aside.
pub fn print_import(batch: &ImportBatch) {
    if let Some(row) = batch.header_row {
        println!("Header detected on row {}", row + 1);
    }
    if let Some(note) = &batch.amount_note {
        println!("Amounts: {note}");
    }
    if !batch.excluded.is_empty() {
        println!("\nExcluded totals:");
        for row in &batch.excluded {
            println!("  {}  {}", row.account_name.dimmed(), usd(row.amount).dimmed());
        }
    }
    if !batch.duplicates.is_empty() {
        println!("\nMerged duplicates:");
        for item in &batch.duplicates {
            println!("  {}  {}", item.account_name.dimmed(), usd(item.amount).dimmed());
        }
    }
}

/// Account-to-bucket table, grouped under section headers where the report
/// had them, with confidence and review markers.
pub fn print_mappings(batch: &ImportBatch, outcome: &MappingOutcome) {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Amount", "Bucket", "Confidence", "Notes"]);

    let mut last_parent: Option<&str> = None;
    for (item, mapping) in batch.items.iter().zip(&outcome.mappings) {
        let parent = item.parent_account.as_deref();
        if parent != last_parent {
            if let Some(p) = parent {
                table.add_row(vec![
                    Cell::new(p.to_uppercase().bold()),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                ]);
            }
            last_parent = parent;
        }

        let name = if parent.is_some() {
            format!("  {}", item.account_name)
        } else {
            item.account_name.clone()
        };
        let bucket = if mapping.was_modified {
            format!("{} *", mapping.bucket.label())
        } else {
            mapping.bucket.label().to_string()
        };
        let confidence = match item.confidence {
            Confidence::High => "high".green().to_string(),
            Confidence::Low => "low".yellow().to_string(),
        };
        let notes = item.needs_review.as_deref().unwrap_or("");
        table.add_row(vec![
            Cell::new(name),
            Cell::new(usd(item.amount)),
            Cell::new(bucket),
            Cell::new(confidence),
            Cell::new(notes),
        ]);
    }

    println!("\nMappings\n{table}");
    if outcome.mappings.iter().any(|m| m.was_modified) {
        println!("{}", "* reassigned this session".dimmed());
    }
}

/// Bucket totals with the real-revenue line underneath.
pub fn print_totals(outcome: &MappingOutcome) {
    let mut table = Table::new();
    table.set_header(vec!["Bucket", "Total"]);
    for bucket in Bucket::ALL {
        table.add_row(vec![
            Cell::new(bucket.label()),
            Cell::new(usd(outcome.totals.get(bucket))),
        ]);
    }
    table.add_row(vec![
        Cell::new("Real Revenue".bold()),
        Cell::new(usd(outcome.real_revenue)),
    ]);
    println!("\nTotals\n{table}");
}

/// Allocation table and insights.
pub fn print_plan(plan: &AllocationPlan) {
    println!(
        "\n{} months of data: {} revenue per month, {} real revenue ({} per month)",
        plan.months_in_data,
        usd(plan.monthly_revenue),
        usd(plan.real_revenue),
        usd(plan.monthly_real_revenue),
    );
    println!("Twice-monthly transfers of {} to split", usd(plan.per_transfer));

    let mut table = Table::new();
    table.set_header(vec![
        "Category",
        "Target",
        "Per Transfer",
        "Current",
        "Gap",
        "Status",
        "12-mo Impact",
    ]);
    for cat in &plan.categories {
        table.add_row(vec![
            Cell::new(cat.category.label()),
            Cell::new(pct(cat.target_pct)),
            Cell::new(usd(cat.transfer)),
            Cell::new(pct(cat.current_pct)),
            Cell::new(signed_pct(cat.gap)),
            Cell::new(status_cell(cat.status)),
            Cell::new(usd(cat.twelve_month_impact)),
        ]);
    }
    println!("\nAllocation\n{table}");

    if !plan.insights.is_empty() {
        println!("\nInsights:");
        for insight in &plan.insights {
            println!("  {} {}", severity_tag(insight.severity), insight.message);
        }
    }
}

fn signed_pct(gap: Decimal) -> String {
    if gap > Decimal::ZERO {
        format!("+{}", pct(gap))
    } else {
        pct(gap)
    }
}

fn status_cell(status: GapStatus) -> ColoredString {
    match status {
        GapStatus::Good => "good".green(),
        GapStatus::Warning => "warning".yellow(),
        GapStatus::Danger => "danger".red().bold(),
    }
}

fn severity_tag(severity: Severity) -> ColoredString {
    match severity {
        Severity::Info => "[info]".cyan(),
        Severity::Warning => "[warn]".yellow(),
        Severity::Danger => "[danger]".red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_display_signs() {
        assert_eq!(signed_pct(Decimal::from(10)), "+10.0%");
        assert_eq!(signed_pct(Decimal::from(-10)), "-10.0%");
        assert_eq!(signed_pct(Decimal::ZERO), "0.0%");
    }
}
