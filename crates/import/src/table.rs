use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use prorata_core::LineItem;

use crate::classify::classify;
use crate::columns::{self, AmountSource};
use crate::filters::{is_metadata_row, is_total_row};
use crate::number::extract_number;
use crate::rules::RuleSet;
use crate::sheet::Cell;

/// A total/subtotal line dropped so aggregates don't double-count, kept on
/// a side list for caller display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRow {
    pub account_name: String,
    pub amount: Decimal,
}

/// Raw parse result, before deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    /// Kept account lines, in parse order.
    pub items: Vec<LineItem>,
    pub excluded: Vec<ExcludedRow>,
    /// Detected header row index (spreadsheet mode only).
    pub header_row: Option<usize>,
    /// Human-readable note on how amounts were located.
    pub amount_note: Option<String>,
}

impl ParsedReport {
    fn empty() -> Self {
        ParsedReport { items: Vec::new(), excluded: Vec::new(), header_row: None, amount_note: None }
    }
}

/// Parses pasted text, CSV, or spreadsheet grids into classified line items.
pub struct TableParser<'a> {
    rules: &'a RuleSet,
}

impl<'a> TableParser<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Text mode. If any line has more than three comma-separated fields the
    /// whole input is treated as CSV; otherwise each line splits on the
    /// first colon or tab, with the remainder scanned for an amount.
    pub fn parse_text(&self, text: &str) -> ParsedReport {
        let csvish = text.lines().any(|line| line.split(',').count() > 3);
        let mut walker = RowWalker::new(self.rules);
        if csvish {
            self.walk_csv(text, &mut walker);
        } else {
            self.walk_delimited(text, &mut walker);
        }
        walker.finish(None, None)
    }

    /// Spreadsheet mode: find the header row, plan columns from it, then
    /// read the data rows below. A grid that yields nothing is re-serialized
    /// as CSV and re-parsed in text mode, which covers reports pasted as
    /// plain text into a single spreadsheet column.
    pub fn parse_grid(&self, grid: &[Vec<Cell>]) -> ParsedReport {
        if grid.is_empty() {
            return ParsedReport::empty();
        }

        let header_row = detect_header_row(grid);
        let header_idx = header_row.unwrap_or(0);
        let headers: Vec<String> = grid[header_idx].iter().map(Cell::as_text).collect();
        let plan = columns::plan(&headers);

        let mut walker = RowWalker::new(self.rules);
        for row in grid.iter().skip(header_idx + 1) {
            let cells: Vec<String> = row.iter().map(Cell::as_text).collect();
            let name = cells.get(plan.account_col).map(|s| s.trim()).unwrap_or("");
            if is_metadata_row(name) {
                continue;
            }
            // The name cell never doubles as the amount cell.
            let primary = match &plan.source {
                AmountSource::TotalColumn(i)
                | AmountSource::LabeledColumn(i)
                | AmountSource::LastColumn(i)
                    if *i == plan.account_col =>
                {
                    None
                }
                source => columns::amount_from_row(&cells, source),
            };
            let amount = primary.or_else(|| fallback_amount(&cells, plan.account_col));
            walker.push(name, amount);
        }

        if walker.items.is_empty() {
            let mut report = self.parse_text(&grid_to_csv(grid));
            report.header_row = header_row;
            report.amount_note = Some(
                "column detection found no account rows; re-parsed as delimited text".to_string(),
            );
            report
        } else {
            walker.finish(header_row, Some(plan.description))
        }
    }

    fn walk_csv(&self, text: &str, walker: &mut RowWalker<'_>) {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(_) => continue,
            };
            let fields: Vec<&str> = record.iter().collect();
            if fields.is_empty() {
                continue;
            }
            if is_metadata_row(&fields.join(" ")) {
                continue;
            }
            let amount = fields[1..].iter().rev().find_map(|f| extract_number(f));
            walker.push(fields[0], amount);
        }
    }

    fn walk_delimited(&self, text: &str, walker: &mut RowWalker<'_>) {
        for line in text.lines() {
            if is_metadata_row(line) {
                continue;
            }
            let mut parts = line.splitn(2, |c| c == ':' || c == '\t');
            let name = parts.next().unwrap_or("");
            let amount = parts.next().and_then(extract_number);
            walker.push(name, amount);
        }
    }
}

/// Shared row policy for every input mode: totals reset the section and land
/// on the excluded list, amount-less rows become section headers, the rest
/// are emitted as classified items.
struct RowWalker<'a> {
    rules: &'a RuleSet,
    parent: Option<String>,
    next_order: u32,
    items: Vec<LineItem>,
    excluded: Vec<ExcludedRow>,
}

impl<'a> RowWalker<'a> {
    fn new(rules: &'a RuleSet) -> Self {
        Self { rules, parent: None, next_order: 0, items: Vec::new(), excluded: Vec::new() }
    }

    fn push(&mut self, name: &str, amount: Option<Decimal>) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if is_total_row(name) {
            self.parent = None;
            if let Some(amount) = amount {
                self.excluded.push(ExcludedRow { account_name: name.to_string(), amount });
            }
            return;
        }
        match amount {
            None => self.parent = Some(name.to_string()),
            Some(amount) => {
                let c = classify(name, self.rules);
                self.items.push(LineItem {
                    account_name: name.to_string(),
                    amount,
                    parent_account: self.parent.clone(),
                    suggested: c.bucket,
                    confidence: c.confidence,
                    needs_review: c.needs_review,
                    sort_order: self.next_order,
                });
                self.next_order += 1;
            }
        }
    }

    fn finish(self, header_row: Option<usize>, amount_note: Option<String>) -> ParsedReport {
        ParsedReport { items: self.items, excluded: self.excluded, header_row, amount_note }
    }
}

/// Scan the first 15 rows for a header signature: a total/YTD/annual label,
/// a month column, or an account/amount label.
fn detect_header_row(grid: &[Vec<Cell>]) -> Option<usize> {
    grid.iter().take(15).position(|row| {
        row.iter().any(|cell| {
            let text = cell.as_text();
            columns::is_total_label(&text)
                || columns::is_month_label(&text)
                || columns::is_account_label(&text)
                || columns::is_amount_label(&text)
        })
    })
}

fn fallback_amount(cells: &[String], account_col: usize) -> Option<Decimal> {
    cells
        .iter()
        .enumerate()
        .rev()
        .filter(|(i, _)| *i != account_col)
        .find_map(|(_, cell)| extract_number(cell))
}

fn grid_to_csv(grid: &[Vec<Cell>]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in grid {
        let fields: Vec<String> = row.iter().map(Cell::as_text).collect();
        let _ = writer.write_record(&fields);
    }
    let bytes = writer.into_inner().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
