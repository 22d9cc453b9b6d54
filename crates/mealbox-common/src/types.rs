//! Domain primitive types used across the mealbox workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::BOX_CYCLE_MONTHS;
use crate::error::{MealboxError, Result};

/// Standard food group a serving counts toward.
///
/// Variant order is the order in which a meal's requirements are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Seasonal and local fruits or vegetables.
    FruitVeg,
    /// Grains.
    Cereal,
    /// Milk and dairy.
    Dairy,
    /// Meat, fish, eggs, or pulses.
    Protein,
    /// Cooking oil.
    Oil,
}

impl Category {
    /// Every category in fill order.
    pub const ALL: [Self; 5] = [
        Self::FruitVeg,
        Self::Cereal,
        Self::Dairy,
        Self::Protein,
        Self::Oil,
    ];

    /// Returns the serialized key of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FruitVeg => "fruit_veg",
            Self::Cereal => "cereal",
            Self::Dairy => "dairy",
            Self::Protein => "protein",
            Self::Oil => "oil",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock a serving was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The senior box for the current cycle month.
    Box,
    /// The main pantry inventory.
    Main,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Main => write!(f, "main"),
        }
    }
}

/// One line of stock, with quantities already converted to servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// Item name as written in the sheet.
    pub item_name: String,
    /// Food group the item belongs to.
    pub category: Category,
    /// Servings still available to allocate.
    pub servings_available: f64,
}

impl StockItem {
    /// Creates a stock line.
    #[must_use]
    pub fn new(item_name: impl Into<String>, category: Category, servings_available: f64) -> Self {
        Self {
            item_name: item_name.into(),
            category,
            servings_available,
        }
    }
}

/// One data row of a worksheet keyed by header, in column order.
pub type SheetRecord = serde_json::Map<String, serde_json::Value>;

/// Everything a monthly plan is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanInputs {
    /// Senior box sheet for the cycle month, as read.
    pub senior_box_records: Vec<SheetRecord>,
    /// Senior box contents resolved against the food reference.
    pub box_items: Vec<StockItem>,
    /// Main inventory resolved against the food reference.
    pub main_items: Vec<StockItem>,
}

/// Calendar month a plan is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Month(u8);

impl Month {
    /// Creates a month from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`MealboxError::InvalidMonth`] outside 1..=12.
    pub fn new(month: i64) -> Result<Self> {
        u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .map(Self)
            .ok_or(MealboxError::InvalidMonth { month })
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Returns which senior box (1, 2 or 3) this month receives.
    #[must_use]
    pub fn cycle(self) -> u8 {
        cycle_month(i64::from(self.0))
    }
}

impl Default for Month {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<i64> for Month {
    type Error = MealboxError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Month> for i64 {
    fn from(month: Month) -> Self {
        Self::from(month.0)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps any month number onto the three-month box rotation.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn cycle_month(month: i64) -> u8 {
    (month.saturating_sub(1).rem_euclid(BOX_CYCLE_MONTHS) + 1) as u8
}
