use rust_decimal::Decimal;

use crate::number::extract_number;

// Header labels are compared after trimming and lowercasing.
const ACCOUNT_LABELS: &[&str] = &[
    "account",
    "description",
    "name",
    "category",
    "account name",
    "line item",
    "expense",
    "income",
];

const TOTAL_LABELS: &[&str] = &[
    "total",
    "ytd",
    "ytd total",
    "total ytd",
    "annual",
    "annual total",
    "year to date",
    "year-to-date",
    "total amount",
    "amount ytd",
];

const AMOUNT_LABELS: &[&str] = &["amount", "balance", "value", "debit", "credit", "net"];

const MONTH_PREFIXES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Which cell(s) of a data row carry the amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountSource {
    /// A single total/YTD/annual column.
    TotalColumn(usize),
    /// Month columns summed per row.
    MonthColumns(Vec<usize>),
    /// A generic labeled amount column.
    LabeledColumn(usize),
    /// Nothing recognized; the last column as a guess.
    LastColumn(usize),
}

/// Column layout decided from a header row, with a display note for the
/// caller ("summing 3 month columns (Jan, Feb, Mar)").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub account_col: usize,
    pub source: AmountSource,
    pub description: String,
}

fn norm(header: &str) -> String {
    header.trim().to_lowercase()
}

pub(crate) fn is_account_label(header: &str) -> bool {
    ACCOUNT_LABELS.contains(&norm(header).as_str())
}

pub(crate) fn is_total_label(header: &str) -> bool {
    TOTAL_LABELS.contains(&norm(header).as_str())
}

pub(crate) fn is_amount_label(header: &str) -> bool {
    AMOUNT_LABELS.contains(&norm(header).as_str())
}

pub(crate) fn is_month_label(header: &str) -> bool {
    let h = norm(header);
    MONTH_PREFIXES.iter().any(|p| h.starts_with(p))
}

/// First column with an account-ish header; column 0 when none matches.
pub fn find_account_column(headers: &[String]) -> usize {
    headers.iter().position(|h| is_account_label(h)).unwrap_or(0)
}

/// Cascading amount-column detection: a year-to-date total column beats
/// month columns, which beat a generic amount label, which beats the
/// last-column guess.
pub fn find_amount_columns(headers: &[String]) -> AmountSource {
    if let Some(i) = headers.iter().position(|h| is_total_label(h)) {
        return AmountSource::TotalColumn(i);
    }
    let months: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_month_label(h))
        .map(|(i, _)| i)
        .collect();
    if !months.is_empty() {
        return AmountSource::MonthColumns(months);
    }
    if let Some(i) = headers.iter().position(|h| is_amount_label(h)) {
        return AmountSource::LabeledColumn(i);
    }
    AmountSource::LastColumn(headers.len().saturating_sub(1))
}

pub fn plan(headers: &[String]) -> ColumnPlan {
    let account_col = find_account_column(headers);
    let source = find_amount_columns(headers);
    let description = describe(headers, &source);
    ColumnPlan { account_col, source, description }
}

fn describe(headers: &[String], source: &AmountSource) -> String {
    let name = |i: usize| {
        headers
            .get(i)
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .unwrap_or("?")
            .to_string()
    };
    match source {
        AmountSource::TotalColumn(i) => format!("using year-to-date column '{}'", name(*i)),
        AmountSource::MonthColumns(cols) => {
            let names: Vec<String> = cols.iter().map(|&i| name(i)).collect();
            format!("summing {} month columns ({})", cols.len(), names.join(", "))
        }
        AmountSource::LabeledColumn(i) => format!("using amount column '{}'", name(*i)),
        AmountSource::LastColumn(i) => {
            format!("no amount header recognized; using last column '{}'", name(*i))
        }
    }
}

/// Read the amount for one data row. Month columns are summed; `None` only
/// when no listed column yields a value.
pub fn amount_from_row(cells: &[String], source: &AmountSource) -> Option<Decimal> {
    match source {
        AmountSource::MonthColumns(cols) => {
            let mut sum = Decimal::ZERO;
            let mut any = false;
            for &col in cols {
                if let Some(v) = cells.get(col).and_then(|c| extract_number(c)) {
                    sum += v;
                    any = true;
                }
            }
            any.then_some(sum)
        }
        AmountSource::TotalColumn(i)
        | AmountSource::LabeledColumn(i)
        | AmountSource::LastColumn(i) => cells.get(*i).and_then(|c| extract_number(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ── account column ────────────────────────────────────────────────────────

    #[test]
    fn account_column_by_label() {
        assert_eq!(find_account_column(&headers(&["#", "Account Name", "Total"])), 1);
        assert_eq!(find_account_column(&headers(&["Description", "Amount"])), 0);
    }

    #[test]
    fn account_column_defaults_to_zero() {
        assert_eq!(find_account_column(&headers(&["Foo", "Bar"])), 0);
    }

    // ── amount cascade ────────────────────────────────────────────────────────

    #[test]
    fn total_column_beats_months() {
        let h = headers(&["Account", "Jan", "Feb", "Total"]);
        assert_eq!(find_amount_columns(&h), AmountSource::TotalColumn(3));
    }

    #[test]
    fn month_columns_when_no_total() {
        let h = headers(&["Account", "Jan 2025", "Feb 2025", "Mar 2025"]);
        assert_eq!(find_amount_columns(&h), AmountSource::MonthColumns(vec![1, 2, 3]));
    }

    #[test]
    fn labeled_amount_column() {
        let h = headers(&["Account", "Memo", "Amount"]);
        assert_eq!(find_amount_columns(&h), AmountSource::LabeledColumn(2));
    }

    #[test]
    fn last_column_fallback() {
        let h = headers(&["Account", "Foo", "Bar"]);
        assert_eq!(find_amount_columns(&h), AmountSource::LastColumn(2));
    }

    #[test]
    fn labels_match_case_insensitive_trimmed() {
        let h = headers(&["ACCOUNT", "  YTD Total  "]);
        assert_eq!(find_account_column(&h), 0);
        assert_eq!(find_amount_columns(&h), AmountSource::TotalColumn(1));
    }

    // ── plan description ──────────────────────────────────────────────────────

    #[test]
    fn plan_describes_chosen_columns() {
        let p = plan(&headers(&["Account", "Jan", "Feb", "Total"]));
        assert!(p.description.contains("Total"));

        let p = plan(&headers(&["Account", "Jan", "Feb"]));
        assert!(p.description.contains("2 month columns"));
        assert!(p.description.contains("Jan, Feb"));

        let p = plan(&headers(&["Account", "Notes"]));
        assert!(p.description.contains("last column"));
    }

    // ── amount_from_row ───────────────────────────────────────────────────────

    #[test]
    fn single_column_read() {
        let source = AmountSource::TotalColumn(2);
        assert_eq!(amount_from_row(&cells(&["Rent", "x", "$1,500"]), &source), Some(d("1500")));
        assert_eq!(amount_from_row(&cells(&["Rent", "x", "n/a"]), &source), None);
    }

    #[test]
    fn month_columns_sum() {
        let source = AmountSource::MonthColumns(vec![1, 2, 3]);
        let row = cells(&["Rent", "100", "200", "300"]);
        assert_eq!(amount_from_row(&row, &source), Some(d("600")));
    }

    #[test]
    fn month_sum_skips_blanks_but_needs_one_value() {
        let source = AmountSource::MonthColumns(vec![1, 2, 3]);
        assert_eq!(amount_from_row(&cells(&["Rent", "", "200", ""]), &source), Some(d("200")));
        assert_eq!(amount_from_row(&cells(&["Rent", "", "", ""]), &source), None);
    }

    #[test]
    fn out_of_range_columns_are_none() {
        let source = AmountSource::TotalColumn(9);
        assert_eq!(amount_from_row(&cells(&["Rent", "100"]), &source), None);
    }
}
