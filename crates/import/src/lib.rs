pub mod classify;
pub mod columns;
pub mod dedup;
pub mod filters;
pub mod number;
pub mod rules;
pub mod sheet;
pub mod table;
pub(crate) mod util;

pub use classify::{classify, Classification};
pub use dedup::{split_duplicates, DedupSplit};
pub use rules::{CategoryRule, RuleCache, RuleError, RuleSet, HIGH_CONFIDENCE_PRIORITY};
pub use sheet::Cell;
pub use table::{ExcludedRow, ParsedReport, TableParser};

use prorata_core::LineItem;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Every row was filtered out as a total, header, or metadata line.
    #[error("no account lines found after filtering ({excluded} summary rows excluded)")]
    NoAccountsFound { excluded: usize },
    #[error("workbook error: {0}")]
    Workbook(String),
}

/// One finished import: deduplicated items plus everything set aside on the
/// way there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    pub items: Vec<LineItem>,
    pub excluded: Vec<ExcludedRow>,
    pub duplicates: Vec<LineItem>,
    pub header_row: Option<usize>,
    pub amount_note: Option<String>,
}

pub mod import {
    use crate::*;

    /// Parse pasted text or CSV and deduplicate the result.
    pub fn import_text(text: &str, rules: &RuleSet) -> Result<ImportBatch, ImportError> {
        finish(TableParser::new(rules).parse_text(text))
    }

    /// Parse a spreadsheet grid and deduplicate the result.
    pub fn import_grid(grid: &[Vec<Cell>], rules: &RuleSet) -> Result<ImportBatch, ImportError> {
        finish(TableParser::new(rules).parse_grid(grid))
    }

    /// Open the first worksheet of a spreadsheet file and import it.
    #[cfg(feature = "xlsx")]
    pub fn import_workbook(
        path: &std::path::Path,
        rules: &RuleSet,
    ) -> Result<ImportBatch, ImportError> {
        let grid = sheet::read_workbook(path)?;
        import_grid(&grid, rules)
    }

    fn finish(report: ParsedReport) -> Result<ImportBatch, ImportError> {
        if report.items.is_empty() {
            return Err(ImportError::NoAccountsFound { excluded: report.excluded.len() });
        }
        let split = split_duplicates(report.items);
        Ok(ImportBatch {
            items: split.unique,
            excluded: report.excluded,
            duplicates: split.duplicates,
            header_row: report.header_row,
            amount_note: report.amount_note,
        })
    }
}
