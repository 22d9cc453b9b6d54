//! Per-day usage totals.

use mealbox_common::types::{Category, Source};
use serde::{Deserialize, Serialize};

use crate::plan::Meal;

/// Total servings of one item used during a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUsage {
    /// Item name as written in the sheet.
    pub item_name: String,
    /// Food group of the item.
    pub category: Category,
    /// Servings used across all meals of the day.
    pub servings_used: f64,
}

/// A day's usage split by stock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayUsage {
    /// Senior box usage.
    pub box_usage: Vec<ItemUsage>,
    /// Main inventory usage.
    pub main_usage: Vec<ItemUsage>,
}

/// Sums the servings of each `(item_name, category)` per source, in order of
/// first use.
pub fn summarize_day_usage(meals: &[Meal]) -> DayUsage {
    let mut usage = DayUsage::default();
    for used in meals.iter().flat_map(|m| &m.used_items) {
        let totals = match used.from {
            Source::Box => &mut usage.box_usage,
            Source::Main => &mut usage.main_usage,
        };
        match totals
            .iter_mut()
            .find(|t| t.item_name == used.item_name && t.category == used.category)
        {
            Some(total) => total.servings_used += used.servings_used,
            None => totals.push(ItemUsage {
                item_name: used.item_name.clone(),
                category: used.category,
                servings_used: used.servings_used,
            }),
        }
    }
    usage
}
