//! In-memory worksheet model.
//!
//! A [`Sheet`] is a header row plus data rows of loosely typed [`Cell`]s.
//! Loaders look columns up by header and coerce cells as they need.

use std::collections::HashMap;
use std::path::PathBuf;

use mealbox_common::error::{MealboxError, Result};
use mealbox_common::types::SheetRecord;
use serde_json::Value;

/// A single worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value.
    Empty,
    /// Text, including dates rendered as text.
    Text(String),
    /// Any numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Numeric value of the cell, if it has one.
    ///
    /// Text is parsed after trimming; booleans count as 1 and 0.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            Self::Number(_) | Self::Empty => None,
        }
    }

    /// Text rendering of the cell, or `None` when empty.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(true) => Some("True".to_string()),
            Self::Bool(false) => Some("False".to_string()),
        }
    }

    /// JSON rendering of the cell; empty cells become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => integral(*n).map_or_else(
                || serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
                |i| Value::Number(i.into()),
            ),
        }
    }

    /// Whether the cell holds nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(n: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    (n.is_finite() && n.fract() == 0.0 && n.abs() < LIMIT).then_some(n as i64)
}

fn format_number(n: f64) -> String {
    integral(n).map_or_else(|| n.to_string(), |i| i.to_string())
}

/// A worksheet read from a workbook.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Builds a sheet whose first row holds the headers.
    ///
    /// Rows where every cell is blank are dropped.
    #[must_use]
    pub fn from_rows(name: impl Into<String>, path: impl Into<PathBuf>, rows: Vec<Vec<Cell>>) -> Self {
        let mut rows = rows.into_iter();
        let headers = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .map(|c| c.to_text().map(|t| t.trim().to_string()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        let rows = rows.filter(|r| !r.iter().all(Cell::is_blank)).collect();
        Self {
            name: name.into(),
            path: path.into(),
            headers,
            rows,
        }
    }

    /// Sheet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header row.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, without the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Index of the column under `header`.
    ///
    /// # Errors
    ///
    /// Returns [`MealboxError::MissingColumn`] if no header matches.
    pub fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| MealboxError::MissingColumn {
                column: header.to_string(),
                sheet: self.name.clone(),
                path: self.path.clone(),
            })
    }

    /// Every data row as a header-keyed record.
    ///
    /// Columns without a header are keyed `Unnamed: <index>`. A repeated
    /// header gets a `.1`, `.2`, ... suffix on each later occurrence.
    #[must_use]
    pub fn records(&self) -> Vec<SheetRecord> {
        let keys = self.record_keys();
        self.rows
            .iter()
            .map(|row| {
                keys.iter()
                    .enumerate()
                    .map(|(i, key)| (key.clone(), row.get(i).map_or(Value::Null, Cell::to_json)))
                    .collect()
            })
            .collect()
    }

    fn record_keys(&self) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if h.is_empty() {
                    return format!("Unnamed: {i}");
                }
                let count = seen.entry(h.as_str()).or_insert(0);
                let key = if *count == 0 {
                    h.clone()
                } else {
                    format!("{h}.{count}")
                };
                *count += 1;
                key
            })
            .collect()
    }
}

static EMPTY: Cell = Cell::Empty;

/// Returns the cell at `index`, treating short rows as empty.
#[must_use]
pub fn cell(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample() -> Sheet {
        Sheet::from_rows(
            "Inventory",
            "data/excel_file.xlsx",
            vec![
                vec![text(" item_name "), text("quantity_in_stock")],
                vec![text("Rice"), Cell::Number(4.0)],
                vec![Cell::Empty, text("  ")],
                vec![text("Oil"), Cell::Empty],
            ],
        )
    }

    #[test]
    fn headers_are_trimmed() {
        assert_eq!(sample().headers(), ["item_name", "quantity_in_stock"]);
    }

    #[test]
    fn blank_rows_are_dropped() {
        assert_eq!(sample().rows().len(), 2);
    }

    #[test]
    fn column_lookup_reports_missing_header() {
        let sheet = sample();
        assert_eq!(sheet.column("quantity_in_stock").unwrap(), 1);
        let err = sheet.column("servings_per_unit").unwrap_err();
        assert!(err.to_string().contains("servings_per_unit"));
        assert!(err.to_string().contains("Inventory"));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(text(" 2.5 ").to_number(), Some(2.5));
        assert_eq!(text("two").to_number(), None);
        assert_eq!(Cell::Bool(true).to_number(), Some(1.0));
        assert_eq!(Cell::Number(f64::NAN).to_number(), None);
        assert_eq!(Cell::Empty.to_number(), None);
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(5.0).to_text().as_deref(), Some("5"));
        assert_eq!(Cell::Number(0.5).to_text().as_deref(), Some("0.5"));
        assert_eq!(Cell::Number(3.0).to_json(), serde_json::json!(3));
    }

    #[test]
    fn records_keep_column_order_and_nulls() {
        let records = sample().records();
        assert_eq!(records.len(), 2);
        let keys: Vec<_> = records[0].keys().cloned().collect();
        assert_eq!(keys, ["item_name", "quantity_in_stock"]);
        assert_eq!(records[1]["quantity_in_stock"], Value::Null);
    }

    #[test]
    fn headerless_columns_get_positional_keys() {
        let sheet = Sheet::from_rows(
            "s",
            "w.xlsx",
            vec![vec![text("item_name"), Cell::Empty], vec![text("a"), text("b")]],
        );
        assert_eq!(sheet.records()[0]["Unnamed: 1"], Value::String("b".into()));
    }

    #[test]
    fn repeated_headers_keep_every_column() {
        let sheet = Sheet::from_rows(
            "Senior Box First Month",
            "senior_box.xlsx",
            vec![
                vec![text("item_name"), text("notes"), text("notes"), text("notes")],
                vec![text("a"), text("first"), text("second"), text("third")],
            ],
        );
        let record = &sheet.records()[0];
        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, ["item_name", "notes", "notes.1", "notes.2"]);
        assert_eq!(record["notes"], Value::String("first".into()));
        assert_eq!(record["notes.1"], Value::String("second".into()));
    }

    #[test]
    fn empty_sheet_has_no_headers() {
        let sheet = Sheet::from_rows("s", "w.xlsx", Vec::new());
        assert!(sheet.headers().is_empty());
        assert!(sheet.records().is_empty());
    }
}
