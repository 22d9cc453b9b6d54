//! Conversion of stock sheets into servings.

use std::collections::BTreeMap;

use mealbox_common::error::Result;
use mealbox_common::types::{Category, StockItem};

use crate::reference::FoodReference;
use crate::sheet::{Sheet, cell};

/// Resolves every row of a stock sheet against the food reference.
///
/// `quantity_column` names the header holding unit counts; non-numeric
/// quantities count as zero. Rows whose item is not in the reference, or whose
/// reference category is not in `categories`, are skipped.
///
/// # Errors
///
/// Returns an error if `item_name` or `quantity_column` is missing.
pub fn collect_stock(
    sheet: &Sheet,
    quantity_column: &str,
    reference: &FoodReference,
    categories: &BTreeMap<String, Category>,
) -> Result<Vec<StockItem>> {
    let name_col = sheet.column("item_name")?;
    let quantity_col = sheet.column(quantity_column)?;

    let mut items = Vec::with_capacity(sheet.rows().len());
    for row in sheet.rows() {
        let Some(item_name) = cell(row, name_col).to_text() else {
            continue;
        };
        let quantity = cell(row, quantity_col).to_number().unwrap_or(0.0);

        let Some(entry) = reference.get(&item_name) else {
            tracing::warn!(sheet = sheet.name(), item = %item_name, "skipping item not found in reference");
            continue;
        };
        let Some(&category) = categories.get(&entry.raw_category) else {
            tracing::warn!(
                sheet = sheet.name(),
                item = %item_name,
                raw_category = %entry.raw_category,
                "skipping item with unrecognized category"
            );
            continue;
        };

        items.push(StockItem {
            item_name,
            category,
            servings_available: quantity * entry.servings_per_unit,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;
    use mealbox_common::config::MealboxConfig;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn reference() -> FoodReference {
        let mut reference = FoodReference::default();
        reference.insert("Rice", "grains", 4.0);
        reference.insert("Apples", "seasonal & local fruits/vegetables", 1.0);
        reference.insert("Candy", "sweets", 1.0);
        reference
    }

    fn sheet(rows: Vec<Vec<Cell>>) -> Sheet {
        let mut all = vec![vec![text("item_name"), text("quantity")]];
        all.extend(rows);
        Sheet::from_rows("Senior Box First Month", "senior_box.xlsx", all)
    }

    #[test]
    fn servings_are_quantity_times_unit_servings() {
        let categories = MealboxConfig::default().categories;
        let sheet = sheet(vec![vec![text("Rice"), Cell::Number(2.0)]]);
        let items = collect_stock(&sheet, "quantity", &reference(), &categories).unwrap();
        assert_eq!(items, vec![StockItem::new("Rice", Category::Cereal, 8.0)]);
    }

    #[test]
    fn original_item_name_is_kept() {
        let categories = MealboxConfig::default().categories;
        let sheet = sheet(vec![vec![text(" APPLES "), Cell::Number(3.0)]]);
        let items = collect_stock(&sheet, "quantity", &reference(), &categories).unwrap();
        assert_eq!(items[0].item_name, " APPLES ");
        assert_eq!(items[0].category, Category::FruitVeg);
    }

    #[test]
    fn unknown_and_unmapped_items_are_skipped() {
        let categories = MealboxConfig::default().categories;
        let sheet = sheet(vec![
            vec![text("Mystery"), Cell::Number(1.0)],
            vec![text("Candy"), Cell::Number(5.0)],
            vec![text("Rice"), Cell::Number(1.0)],
        ]);
        let items = collect_stock(&sheet, "quantity", &reference(), &categories).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "Rice");
    }

    #[test]
    fn non_numeric_quantity_counts_as_zero() {
        let categories = MealboxConfig::default().categories;
        let sheet = sheet(vec![vec![text("Rice"), text("lots")]]);
        let items = collect_stock(&sheet, "quantity", &reference(), &categories).unwrap();
        assert!(items[0].servings_available.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_quantity_column_fails() {
        let categories = MealboxConfig::default().categories;
        let sheet = sheet(Vec::new());
        let err = collect_stock(&sheet, "quantity_in_stock", &reference(), &categories).unwrap_err();
        assert!(err.to_string().contains("quantity_in_stock"));
    }
}
