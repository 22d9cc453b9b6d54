//! Senior box contents for one month of the rotation.

use std::collections::BTreeMap;
use std::path::Path;

use mealbox_common::error::Result;
use mealbox_common::types::{Category, SheetRecord, StockItem};

use crate::reference::FoodReference;
use crate::sheet::Sheet;
use crate::stock::collect_stock;
use crate::workbook::{SheetSelector, read_sheet};

/// Quantity header of the senior box sheets.
pub const QUANTITY_COLUMN: &str = "quantity";

/// One month's senior box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeniorBox {
    /// The sheet exactly as read, one record per row.
    pub records: Vec<SheetRecord>,
    /// Rows that resolved against the reference, in servings.
    pub items: Vec<StockItem>,
}

impl SeniorBox {
    /// Reads `sheet` of the senior box workbook.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook or sheet is missing, or the sheet
    /// lacks `item_name` or `quantity`.
    pub fn load(
        path: &Path,
        sheet: &str,
        reference: &FoodReference,
        categories: &BTreeMap<String, Category>,
    ) -> Result<Self> {
        tracing::info!(path = %path.display(), sheet, "loading senior box");
        let sheet = read_sheet(path, SheetSelector::Named(sheet))?;
        Self::from_sheet(&sheet, reference, categories)
    }

    /// Builds the box from an already-read sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing.
    pub fn from_sheet(
        sheet: &Sheet,
        reference: &FoodReference,
        categories: &BTreeMap<String, Category>,
    ) -> Result<Self> {
        let records = sheet.records();
        let items = collect_stock(sheet, QUANTITY_COLUMN, reference, categories)?;
        tracing::debug!(rows = records.len(), items = items.len(), "senior box ready");
        Ok(Self { records, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;
    use mealbox_common::config::MealboxConfig;
    use serde_json::json;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn records_include_skipped_rows_and_extra_columns() {
        let sheet = Sheet::from_rows(
            "Senior Box First Month",
            "senior_box.xlsx",
            vec![
                vec![text("item_name"), text("quantity"), text("notes")],
                vec![text("Oats"), Cell::Number(2.0), Cell::Empty],
                vec![text("Unknown"), Cell::Number(1.0), text("donated")],
            ],
        );
        let mut reference = FoodReference::default();
        reference.insert("oats", "grains", 3.0);
        let categories = MealboxConfig::default().categories;

        let senior_box = SeniorBox::from_sheet(&sheet, &reference, &categories).unwrap();

        assert_eq!(senior_box.records.len(), 2);
        assert_eq!(
            serde_json::Value::Object(senior_box.records[1].clone()),
            json!({"item_name": "Unknown", "quantity": 1, "notes": "donated"})
        );
        assert_eq!(senior_box.items, vec![StockItem::new("Oats", Category::Cereal, 6.0)]);
    }
}
