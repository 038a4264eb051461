use rust_decimal::Decimal;

/// A raw spreadsheet cell, decoupled from any particular workbook reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(Decimal),
}

impl Cell {
    /// Canonical text content; numbers print plainly, empty is `""`.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        use rust_decimal::prelude::FromPrimitive;
        Decimal::from_f64(f).map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Number(Decimal::from(i))
    }
}

/// Load the first worksheet of an Excel workbook as a neutral grid.
#[cfg(feature = "xlsx")]
pub fn read_workbook(path: &std::path::Path) -> Result<Vec<Vec<Cell>>, crate::ImportError> {
    use calamine::{open_workbook_auto, Reader};

    use crate::ImportError;

    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::Workbook(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Workbook("workbook has no sheets".to_string()))?
        .map_err(|e| ImportError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

#[cfg(feature = "xlsx")]
fn cell_from_data(data: &calamine::Data) -> Cell {
    use calamine::Data;
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::from(*f),
        Data::Int(i) => Cell::from(*i),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::from(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_text_variants() {
        assert_eq!(Cell::Empty.as_text(), "");
        assert_eq!(Cell::from("Rent").as_text(), "Rent");
        assert_eq!(Cell::from(1234.5).as_text(), "1234.5");
        assert_eq!(Cell::from(-500i64).as_text(), "-500");
    }

    #[test]
    fn empty_detection() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::from("").is_empty());
        assert!(Cell::Text("   ".to_string()).is_empty());
        assert!(!Cell::from("x").is_empty());
        assert!(!Cell::from(0i64).is_empty());
    }

    #[test]
    fn non_finite_floats_become_empty() {
        assert_eq!(Cell::from(f64::NAN), Cell::Empty);
        assert_eq!(Cell::from(f64::INFINITY), Cell::Empty);
    }
}
