//! Food reference: what each item is and how many servings a unit holds.

use std::collections::HashMap;
use std::path::Path;

use mealbox_common::error::Result;

use crate::sheet::{Sheet, cell};
use crate::workbook::{SheetSelector, read_sheet};

/// Servings assumed when a reference row has no usable `servings_per_unit`.
pub const DEFAULT_SERVINGS_PER_UNIT: f64 = 1.0;

/// Reference data for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry {
    /// Category as written in the reference, trimmed and lowercased.
    pub raw_category: String,
    /// Servings provided by one unit of stock.
    pub servings_per_unit: f64,
}

/// Item reference keyed by normalized item name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodReference {
    entries: HashMap<String, ReferenceEntry>,
}

/// Normalizes an item name for reference lookups.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl FoodReference {
    /// Reads the first worksheet of the reference workbook.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be read or lacks one of the
    /// `item_name`, `item_category`, `servings_per_unit` columns.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading food reference");
        let sheet = read_sheet(path, SheetSelector::First)?;
        Self::from_sheet(&sheet)
    }

    /// Builds the reference from an already-read sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let name_col = sheet.column("item_name")?;
        let category_col = sheet.column("item_category")?;
        let servings_col = sheet.column("servings_per_unit")?;

        let mut reference = Self::default();
        for row in sheet.rows() {
            let Some(name) = cell(row, name_col).to_text() else {
                continue;
            };
            let raw_category = cell(row, category_col)
                .to_text()
                .map(|c| normalize_name(&c))
                .unwrap_or_default();
            let servings_per_unit = cell(row, servings_col)
                .to_number()
                .unwrap_or(DEFAULT_SERVINGS_PER_UNIT);
            reference.insert(&name, raw_category, servings_per_unit);
        }
        tracing::debug!(items = reference.len(), "food reference ready");
        Ok(reference)
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: &str, raw_category: impl Into<String>, servings_per_unit: f64) {
        let _ = self.entries.insert(
            normalize_name(name),
            ReferenceEntry {
                raw_category: raw_category.into(),
                servings_per_unit,
            },
        );
    }

    /// Looks an item up by name; case and surrounding whitespace are ignored.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&normalize_name(name))
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the reference has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
