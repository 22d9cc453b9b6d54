//! Workbook access through `calamine`.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use mealbox_common::error::{MealboxError, Result};

use crate::sheet::{Cell, Sheet};

/// Which worksheet of a workbook to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSelector<'a> {
    /// The first worksheet, whatever its name.
    First,
    /// The worksheet with exactly this name.
    Named(&'a str),
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) if s.is_empty() => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Float(f) => Self::Number(*f),
            #[allow(clippy::cast_precision_loss)]
            Data::Int(i) => Self::Number(*i as f64),
            Data::Bool(b) => Self::Bool(*b),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Reads one worksheet of an `.xlsx`, `.xls` or `.ods` workbook.
///
/// # Errors
///
/// Returns [`MealboxError::WorkbookNotFound`] if the file is absent,
/// [`MealboxError::SheetNotFound`] if a named sheet does not exist, and
/// [`MealboxError::Workbook`] if the file cannot be parsed.
pub fn read_sheet(path: &Path, selector: SheetSelector<'_>) -> Result<Sheet> {
    if !path.is_file() {
        return Err(MealboxError::WorkbookNotFound {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), ?selector, "opening workbook");

    let workbook_error = |message: String| MealboxError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let names = workbook.sheet_names();
    let name = match selector {
        SheetSelector::First => names
            .first()
            .cloned()
            .ok_or_else(|| workbook_error("workbook has no worksheets".to_string()))?,
        SheetSelector::Named(wanted) => {
            if !names.iter().any(|n| n == wanted) {
                return Err(MealboxError::SheetNotFound {
                    sheet: wanted.to_string(),
                    path: path.to_path_buf(),
                });
            }
            wanted.to_string()
        }
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| workbook_error(e.to_string()))?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    let sheet = Sheet::from_rows(name, path, rows);
    tracing::debug!(
        path = %path.display(),
        sheet = sheet.name(),
        rows = sheet.rows().len(),
        "worksheet loaded"
    );
    Ok(sheet)
}
