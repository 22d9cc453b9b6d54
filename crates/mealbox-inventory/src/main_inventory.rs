//! Main pantry inventory.

use std::collections::BTreeMap;
use std::path::Path;

use mealbox_common::error::Result;
use mealbox_common::types::{Category, StockItem};

use crate::reference::FoodReference;
use crate::stock::collect_stock;
use crate::workbook::{SheetSelector, read_sheet};

/// Quantity header of the inventory sheet.
pub const QUANTITY_COLUMN: &str = "quantity_in_stock";

/// Reads `sheet` of the main inventory workbook and converts it to servings.
///
/// # Errors
///
/// Returns an error if the workbook or sheet is missing, or the sheet lacks
/// `item_name` or `quantity_in_stock`.
pub fn load_main_inventory(
    path: &Path,
    sheet: &str,
    reference: &FoodReference,
    categories: &BTreeMap<String, Category>,
) -> Result<Vec<StockItem>> {
    tracing::info!(path = %path.display(), sheet, "loading main inventory");
    let sheet = read_sheet(path, SheetSelector::Named(sheet))?;
    let items = collect_stock(&sheet, QUANTITY_COLUMN, reference, categories)?;
    tracing::debug!(items = items.len(), "main inventory ready");
    Ok(items)
}
