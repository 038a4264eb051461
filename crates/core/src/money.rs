use rust_decimal::Decimal;

/// Accounting-style USD: two decimals, thousands separators, negatives in
/// parentheses. `usd(d("-1234.5"))` is `"($1,234.50)"`.
pub fn usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let grouped = group_thousands(whole);
    if negative {
        format!("(${grouped}.{frac})")
    } else {
        format!("${grouped}.{frac}")
    }
}

/// One-decimal percentage: `pct(d("12.5"))` is `"12.5%"`.
pub fn pct(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(usd(d("1234.56")), "$1,234.56");
        assert_eq!(usd(d("1000000")), "$1,000,000.00");
        assert_eq!(usd(d("999")), "$999.00");
    }

    #[test]
    fn usd_negatives_use_parentheses() {
        assert_eq!(usd(d("-1234.5")), "($1,234.50)");
        assert_eq!(usd(d("-0.75")), "($0.75)");
    }

    #[test]
    fn usd_zero_is_not_parenthesized() {
        assert_eq!(usd(d("0")), "$0.00");
        assert_eq!(usd(d("-0.001")), "$0.00");
    }

    #[test]
    fn usd_pads_to_two_decimals() {
        assert_eq!(usd(d("12.4")), "$12.40");
        assert_eq!(usd(d("12")), "$12.00");
    }

    #[test]
    fn pct_one_decimal() {
        assert_eq!(pct(d("12.5")), "12.5%");
        assert_eq!(pct(d("-3")), "-3.0%");
        assert_eq!(pct(d("0")), "0.0%");
    }
}
