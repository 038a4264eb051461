mod config;
mod report;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use prorata_core::{Bucket, Quarter};
use prorata_import::{import, ImportBatch, RuleCache, RuleSet};
use prorata_plan::{AllocationCalculator, MappingSession, YtdFigures};

use config::Profile;

#[derive(Parser)]
#[command(
    name = "prorata",
    about = "Split a year-to-date P&L into cash-flow allocation buckets."
)]
struct Cli {
    /// P&L to read: text or CSV file, a spreadsheet with the xlsx feature,
    /// or - for stdin.
    file: PathBuf,

    /// TOML rule file replacing the built-in keyword catalog.
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// TOML profile with targets, period, and previous mappings.
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Quarter the figures run through (q1..q4).
    #[arg(long)]
    quarter: Option<Quarter>,

    /// Explicit month count when the data doesn't line up with a quarter.
    #[arg(long)]
    months: Option<u32>,

    /// Reassign an account before totaling, e.g. --set "Shop Rent=opex".
    /// Repeatable.
    #[arg(long = "set", value_name = "ACCOUNT=BUCKET")]
    set: Vec<String>,

    /// Stop after the mapping table; skip the allocation plan.
    #[arg(long)]
    no_plan: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let profile = match &cli.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    let rules = load_rules(&cli);
    let batch = read_batch(&cli, &rules)?;
    tracing::info!(
        "Imported {} accounts ({} totals excluded, {} duplicates merged)",
        batch.items.len(),
        batch.excluded.len(),
        batch.duplicates.len()
    );

    let mut session = MappingSession::seed(batch.items.clone(), &profile.previous_mappings);
    for assignment in &cli.set {
        let (account, bucket) = parse_assignment(assignment)?;
        session
            .set_bucket(account, bucket)
            .with_context(|| format!("--set '{assignment}'"))?;
    }
    let outcome = session.apply();

    report::print_import(&batch);
    report::print_mappings(&batch, &outcome);
    report::print_totals(&outcome);

    if cli.no_plan {
        return Ok(());
    }

    let quarter = resolve_quarter(&cli, &profile)?;
    let mut calculator = AllocationCalculator::new(profile.targets, quarter);
    if let Some(months) = cli.months.or(profile.months) {
        calculator = calculator.with_months(months);
    }
    let plan = calculator.plan(&YtdFigures::from_totals(&outcome.totals));
    report::print_plan(&plan);
    Ok(())
}

/// Rules come from `--rules` through the session cache, so a bad file
/// degrades to an empty set with a warning. Without the flag, the built-in
/// catalog.
fn load_rules(cli: &Cli) -> RuleSet {
    match &cli.rules {
        Some(path) => {
            let mut cache = RuleCache::new();
            let rules = cache
                .get_or_fetch(|| -> Result<RuleSet, String> {
                    let text = std::fs::read_to_string(path)
                        .map_err(|e| format!("{}: {e}", path.display()))?;
                    RuleSet::from_toml(&text).map_err(|e| e.to_string())
                })
                .clone();
            if let Some(err) = cache.fetch_error() {
                tracing::warn!("Rule file unavailable, classifying without rules: {err}");
            }
            rules
        }
        None => RuleSet::builtin(),
    }
}

fn read_batch(cli: &Cli, rules: &RuleSet) -> Result<ImportBatch> {
    if cli.file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
        return Ok(import::import_text(&text, rules)?);
    }

    let ext = cli.file.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xlsx") | Some("xls") | Some("ods") => read_workbook_batch(&cli.file, rules),
        _ => {
            let text = std::fs::read_to_string(&cli.file)
                .with_context(|| format!("reading {}", cli.file.display()))?;
            Ok(import::import_text(&text, rules)?)
        }
    }
}

#[cfg(feature = "xlsx")]
fn read_workbook_batch(path: &Path, rules: &RuleSet) -> Result<ImportBatch> {
    Ok(import::import_workbook(path, rules)?)
}

#[cfg(not(feature = "xlsx"))]
fn read_workbook_batch(path: &Path, _rules: &RuleSet) -> Result<ImportBatch> {
    anyhow::bail!(
        "{} looks like a spreadsheet; rebuild with the xlsx feature to read it",
        path.display()
    )
}

fn parse_assignment(raw: &str) -> Result<(&str, Bucket)> {
    let (account, bucket) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("--set wants ACCOUNT=BUCKET, got '{raw}'"))?;
    let bucket = bucket.trim().parse::<Bucket>().map_err(|e| anyhow!(e))?;
    Ok((account.trim(), bucket))
}

/// `--quarter` beats the profile; with neither, assume a full year.
fn resolve_quarter(cli: &Cli, profile: &Profile) -> Result<Quarter> {
    if let Some(quarter) = cli.quarter {
        return Ok(quarter);
    }
    if let Some(n) = profile.quarter {
        return Quarter::new(n).ok_or_else(|| anyhow!("profile quarter {n} is out of range (1-4)"));
    }
    tracing::info!("No quarter given; assuming a full year of data");
    Ok(Quarter::Q4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "prorata",
            "report.csv",
            "--quarter",
            "q2",
            "--months",
            "5",
            "--set",
            "Shop Rent=opex",
            "--no-plan",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("report.csv"));
        assert_eq!(cli.quarter, Some(Quarter::Q2));
        assert_eq!(cli.months, Some(5));
        assert_eq!(cli.set, vec!["Shop Rent=opex"]);
        assert!(cli.no_plan);
    }

    #[test]
    fn assignments_split_on_first_equals() {
        let (account, bucket) = parse_assignment("Owner Draw=owner_pay").unwrap();
        assert_eq!(account, "Owner Draw");
        assert_eq!(bucket, Bucket::OwnerPay);
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("Rent=misc").is_err());
    }

    #[test]
    fn quarter_resolution_order() {
        let cli = Cli::try_parse_from(["prorata", "-", "--quarter", "q1"]).unwrap();
        let profile = Profile { quarter: Some(3), ..Profile::default() };
        assert_eq!(resolve_quarter(&cli, &profile).unwrap(), Quarter::Q1);

        let cli = Cli::try_parse_from(["prorata", "-"]).unwrap();
        assert_eq!(resolve_quarter(&cli, &profile).unwrap(), Quarter::Q3);
        assert_eq!(resolve_quarter(&cli, &Profile::default()).unwrap(), Quarter::Q4);

        let bad = Profile { quarter: Some(9), ..Profile::default() };
        assert!(resolve_quarter(&cli, &bad).is_err());
    }
}
