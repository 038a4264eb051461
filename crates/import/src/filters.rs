use crate::util::re;

// ── Total and summary rows ───────────────────────────────────────────────────

re!(re_total_lead,
    r"(?i)^\s*(totals?|sub[\s-]?totals?|net\s+(income|loss|profit|revenue)|gross\s+(profit|margin|income)|operating\s+(income|profit|loss)|ebit(da)?)\b");
re!(re_total_anywhere,
    r"(?i)\btotal\s+(revenue|income|expenses?|costs?|cogs)\b");

/// Whether an account name is a total/subtotal/summary row that would
/// double-count detail lines if kept.
pub fn is_total_row(name: &str) -> bool {
    re_total_lead().is_match(name) || re_total_anywhere().is_match(name)
}

// ── Metadata rows ────────────────────────────────────────────────────────────

re!(re_paste_arrow, r"→|->");
re!(re_month_word,
    r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)\b");
re!(re_bare_year, r"^(19|20)\d{2}$");
re!(re_quarter_label, r"(?i)^q[1-4]([\s,-]+\d{4})?$");
re!(re_report_title,
    r"(?i)\b(profit\s*(and|&)\s*loss|income\s+statement|balance\s+sheet|statement\s+of\s+activit(y|ies))\b");
re!(re_report_furniture,
    r"(?i)^(date\b|period\b|report(ing)?\b|prepared\b|as\s+of\b|for\s+the\s+(month|quarter|year)\b)");
re!(re_page_marker, r"(?i)^page\s+\d+");
re!(re_basis_note, r"(?i)\b(accrual|cash)\s+basis\b");
re!(re_separator_only, r"^[-=_~*.•|\s]+$");

/// Whether a raw row is report furniture rather than account data: titles,
/// date headers, month/year column rows, page markers, separators.
pub fn is_metadata_row(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < 2 {
        return true;
    }
    re_paste_arrow().is_match(trimmed)
        || re_month_word().is_match(trimmed)
        || re_bare_year().is_match(trimmed)
        || re_quarter_label().is_match(trimmed)
        || re_report_title().is_match(trimmed)
        || re_report_furniture().is_match(trimmed)
        || re_page_marker().is_match(trimmed)
        || re_basis_note().is_match(trimmed)
        || re_separator_only().is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── is_total_row ──────────────────────────────────────────────────────────

    #[test]
    fn total_rows_by_leading_keyword() {
        assert!(is_total_row("Total Income"));
        assert!(is_total_row("TOTAL EXPENSES"));
        assert!(is_total_row("Subtotal - Payroll"));
        assert!(is_total_row("Sub-total"));
        assert!(is_total_row("Net Income"));
        assert!(is_total_row("Net Loss"));
        assert!(is_total_row("Gross Profit"));
        assert!(is_total_row("Operating Income"));
        assert!(is_total_row("EBITDA"));
    }

    #[test]
    fn total_rows_by_embedded_phrase() {
        assert!(is_total_row("2025 Total Revenue"));
        assert!(is_total_row("YTD Total Expenses"));
        assert!(is_total_row("Less Total COGS"));
    }

    #[test]
    fn ordinary_accounts_are_not_totals() {
        assert!(!is_total_row("Rent"));
        assert!(!is_total_row("Owner's Pay"));
        assert!(!is_total_row("Totally Awesome LLC"));
        assert!(!is_total_row("Subscriptions"));
    }

    // ── is_metadata_row ───────────────────────────────────────────────────────

    #[test]
    fn blank_and_single_char_rows() {
        assert!(is_metadata_row(""));
        assert!(is_metadata_row("   "));
        assert!(is_metadata_row("x"));
        assert!(!is_metadata_row("ad"));
    }

    #[test]
    fn paste_headers_with_arrows() {
        assert!(is_metadata_row("QuickBooks → Reports → Profit and Loss"));
        assert!(is_metadata_row("Export -> P&L"));
    }

    #[test]
    fn month_and_year_rows() {
        assert!(is_metadata_row("January"));
        assert!(is_metadata_row("Jan Feb Mar Apr"));
        assert!(is_metadata_row("As of June 30"));
        assert!(is_metadata_row("2025"));
        assert!(is_metadata_row("Q3"));
        assert!(is_metadata_row("Q1 2025"));
        assert!(is_metadata_row("Q1-2025"));
    }

    #[test]
    fn report_titles_and_furniture() {
        assert!(is_metadata_row("Profit and Loss"));
        assert!(is_metadata_row("Profit & Loss Statement"));
        assert!(is_metadata_row("Income Statement"));
        assert!(is_metadata_row("Balance Sheet"));
        assert!(is_metadata_row("Prepared by Jordan"));
        assert!(is_metadata_row("Reporting period: FY25"));
        assert!(is_metadata_row("For the Quarter Ended"));
        assert!(is_metadata_row("Page 2 of 3"));
        assert!(is_metadata_row("Accrual Basis"));
        assert!(is_metadata_row("Cash Basis"));
    }

    #[test]
    fn separator_rows() {
        assert!(is_metadata_row("-----"));
        assert!(is_metadata_row("====="));
        assert!(is_metadata_row("___ ___"));
        assert!(is_metadata_row("*****"));
    }

    #[test]
    fn account_rows_survive() {
        assert!(!is_metadata_row("Rent: $500"));
        assert!(!is_metadata_row("Consulting Revenue"));
        assert!(!is_metadata_row("Maya's Catering")); // "may" needs word boundary
        assert!(!is_metadata_row("Separator Supplies")); // "sep" needs word boundary
        assert!(!is_metadata_row("Owner's Pay"));
    }

    #[test]
    fn year_must_be_the_whole_row() {
        assert!(!is_metadata_row("Reserve 2025 Fund"));
    }
}
