//! Serving allocation against box and main stock.

use mealbox_common::config::MealRequirement;
use mealbox_common::types::{Category, Source, StockItem};
use serde::{Deserialize, Serialize};

/// Servings taken from one stock line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedItem {
    /// Item name as written in the sheet.
    pub item_name: String,
    /// Food group the servings count toward.
    pub category: Category,
    /// Servings taken.
    pub servings_used: f64,
    /// Stock the servings came from.
    pub from: Source,
}

/// Outcome of filling one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAllocation {
    /// Takes, in the order they happened.
    pub used: Vec<UsedItem>,
    /// Servings that could not be found.
    pub needed_left: f64,
}

impl CategoryAllocation {
    /// Whether the category could not be filled.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.needed_left > 0.0
    }
}

/// Outcome of filling one meal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealAllocation {
    /// Takes across all categories of the meal.
    pub used: Vec<UsedItem>,
    /// Whether any category came up short.
    pub short: bool,
}

/// Takes `needed` servings of `category`, box stock first.
///
/// Stock lines are consumed in order. Servings taken are subtracted from the
/// lines in place, including when the category ends up short.
pub fn allocate_category(
    box_items: &mut [StockItem],
    main_items: &mut [StockItem],
    category: Category,
    needed: f64,
) -> CategoryAllocation {
    let mut allocation = CategoryAllocation {
        used: Vec::new(),
        needed_left: needed,
    };
    draw(box_items, Source::Box, category, &mut allocation);
    draw(main_items, Source::Main, category, &mut allocation);
    allocation
}

fn draw(items: &mut [StockItem], from: Source, category: Category, allocation: &mut CategoryAllocation) {
    for item in items.iter_mut().filter(|i| i.category == category) {
        if allocation.needed_left <= 0.0 {
            break;
        }
        let take = if item.servings_available >= allocation.needed_left {
            allocation.needed_left
        } else if item.servings_available > 0.0 {
            item.servings_available
        } else {
            continue;
        };
        allocation.used.push(UsedItem {
            item_name: item.item_name.clone(),
            category,
            servings_used: take,
            from,
        });
        item.servings_available -= take;
        allocation.needed_left -= take;
    }
}

/// Fills every category of a meal with a positive requirement.
///
/// A shortage in one category does not stop the remaining categories from
/// being filled.
pub fn allocate_meal(
    box_items: &mut [StockItem],
    main_items: &mut [StockItem],
    meal: &MealRequirement,
) -> MealAllocation {
    let mut result = MealAllocation::default();
    for (&category, &needed) in meal.requirements.iter().filter(|&(_, &n)| n > 0) {
        let allocation = allocate_category(box_items, main_items, category, f64::from(needed));
        if allocation.is_short() {
            tracing::trace!(meal = %meal.meal_time, %category, missing = allocation.needed_left, "category short");
            result.short = true;
        }
        result.used.extend(allocation.used);
    }
    result
}
