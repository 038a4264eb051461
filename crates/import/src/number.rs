use rust_decimal::Decimal;
use std::str::FromStr;

use crate::util::re;

re!(re_number, r"-?\s*\$?\s*-?\d[\d,]*(?:\.\d+)?");

/// Pull a signed amount out of a free-form token.
///
/// Handles currency symbols, comma thousands groups, bare minus signs, and
/// accounting-style parentheses, ignoring surrounding noise. `None` means the
/// token carried no digits at all, which is distinct from a parsed zero.
pub fn extract_number(token: &str) -> Option<Decimal> {
    let matched = re_number().find(token)?;
    let clean: String = matched
        .as_str()
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    let value = Decimal::from_str(&clean).ok()?;
    if token.contains('(') && token.contains(')') {
        Some(-value.abs())
    } else {
        Some(value)
    }
}
