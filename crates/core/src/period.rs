use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar quarter the year-to-date figures run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quarter::Q1 => write!(f, "Q1"),
            Quarter::Q2 => write!(f, "Q2"),
            Quarter::Q3 => write!(f, "Q3"),
            Quarter::Q4 => write!(f, "Q4"),
        }
    }
}

impl Quarter {
    pub fn new(n: u8) -> Option<Self> {
        match n {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    /// Months of data a year-to-date report through this quarter covers.
    pub fn months_elapsed(self) -> u32 {
        self.number() as u32 * 3
    }
}

impl std::str::FromStr for Quarter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches(['q', 'Q']);
        normalized
            .parse::<u8>()
            .ok()
            .and_then(Quarter::new)
            .ok_or_else(|| format!("Unknown quarter: '{s}' (expected q1..q4)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_valid_and_invalid() {
        assert_eq!(Quarter::new(1), Some(Quarter::Q1));
        assert_eq!(Quarter::new(4), Some(Quarter::Q4));
        assert_eq!(Quarter::new(0), None);
        assert_eq!(Quarter::new(5), None);
    }

    #[test]
    fn display() {
        assert_eq!(Quarter::Q1.to_string(), "Q1");
        assert_eq!(Quarter::Q4.to_string(), "Q4");
    }

    #[test]
    fn months_elapsed_is_three_per_quarter() {
        assert_eq!(Quarter::Q1.months_elapsed(), 3);
        assert_eq!(Quarter::Q2.months_elapsed(), 6);
        assert_eq!(Quarter::Q3.months_elapsed(), 9);
        assert_eq!(Quarter::Q4.months_elapsed(), 12);
    }

    #[test]
    fn from_str_accepts_common_spellings() {
        assert_eq!(Quarter::from_str("q2").unwrap(), Quarter::Q2);
        assert_eq!(Quarter::from_str("Q3").unwrap(), Quarter::Q3);
        assert_eq!(Quarter::from_str("4").unwrap(), Quarter::Q4);
        assert!(Quarter::from_str("q5").is_err());
        assert!(Quarter::from_str("spring").is_err());
    }
}
