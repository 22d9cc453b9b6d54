//! Monthly plan generation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mealbox_common::config::{MealRequirement, MealboxConfig};
use mealbox_common::constants::{MAX_PLAN_DAYS, SHORTAGE_KIND, SHORTAGE_MESSAGE};
use mealbox_common::types::{Category, Month, PlanInputs, SheetRecord, StockItem};
use serde::{Deserialize, Serialize};

use crate::allocation::{UsedItem, allocate_meal};
use crate::summary::{ItemUsage, summarize_day_usage};

/// One served meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Meal label, e.g. `Breakfast`.
    pub meal_time: String,
    /// Servings the meal had to provide per category.
    pub meal_plan_requirements: BTreeMap<Category, u32>,
    /// Takes that provided them.
    pub used_items: Vec<UsedItem>,
}

/// One day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day of the month.
    pub day_number: u32,
    /// Meals served; empty on a shortage day.
    pub meals: Vec<Meal>,
    /// Box usage totals; absent on a shortage day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_box_usage: Option<Vec<ItemUsage>>,
    /// Main inventory usage totals; absent on a shortage day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_main_usage: Option<Vec<ItemUsage>>,
}

impl DayPlan {
    /// Whether the day could not be served.
    #[must_use]
    pub const fn is_shortage(&self) -> bool {
        self.day_box_usage.is_none()
    }
}

/// A day that could not be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayShortage {
    /// 1-based day of the month.
    pub day_number: u32,
    /// Human-readable reasons.
    pub shortages: Vec<String>,
}

/// Grouped shortage days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageReport {
    /// Report type tag, always `meal_plan_shortage`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Every day that could not be served.
    pub details: Vec<DayShortage>,
}

/// A generated monthly plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    /// Month the caller asked for.
    pub month_requested: Month,
    /// Senior box rotation month (1, 2 or 3).
    pub cycle_month: u8,
    /// Senior box sheet as read.
    pub senior_box_items_for_month: Vec<SheetRecord>,
    /// Every planned day, in order.
    pub final_daily_plan: Vec<DayPlan>,
    /// Empty, or one report listing all shortage days.
    pub all_shortages: Vec<ShortageReport>,
    /// When the plan was generated.
    pub generated_at: DateTime<Utc>,
}

impl MonthlyPlan {
    /// Number of days that could not be served.
    #[must_use]
    pub fn shortage_days(&self) -> usize {
        self.final_daily_plan.iter().filter(|d| d.is_shortage()).count()
    }
}

/// Plans days against the configured meal requirements.
#[derive(Debug, Clone)]
pub struct Planner {
    meals: Vec<MealRequirement>,
    days: u32,
}

impl Planner {
    /// Creates a planner for `days` days of `meals`.
    #[must_use]
    pub const fn new(meals: Vec<MealRequirement>, days: u32) -> Self {
        Self { meals, days }
    }

    /// Creates a planner from the service configuration.
    #[must_use]
    pub fn from_config(config: &MealboxConfig) -> Self {
        Self::new(config.meals.clone(), config.plan_days)
    }

    /// Builds the plan for `month` from `inputs`.
    pub fn monthly_plan(&self, month: Month, inputs: PlanInputs) -> MonthlyPlan {
        let PlanInputs {
            senior_box_records,
            mut box_items,
            mut main_items,
        } = inputs;

        let mut final_daily_plan = Vec::with_capacity(self.days.min(MAX_PLAN_DAYS) as usize);
        let mut shortages = Vec::new();
        for day_number in 1..=self.days {
            let day = self.plan_day(day_number, &mut box_items, &mut main_items);
            if day.is_shortage() {
                shortages.push(DayShortage {
                    day_number,
                    shortages: vec![SHORTAGE_MESSAGE.to_string()],
                });
            }
            final_daily_plan.push(day);
        }

        tracing::info!(
            month = month.number(),
            cycle = month.cycle(),
            days = self.days,
            shortage_days = shortages.len(),
            "monthly plan generated"
        );

        let all_shortages = if shortages.is_empty() {
            Vec::new()
        } else {
            vec![ShortageReport {
                kind: SHORTAGE_KIND.to_string(),
                details: shortages,
            }]
        };

        MonthlyPlan {
            month_requested: month,
            cycle_month: month.cycle(),
            senior_box_items_for_month: senior_box_records,
            final_daily_plan,
            all_shortages,
            generated_at: Utc::now(),
        }
    }

    /// Serves one day. On the first short meal the day is abandoned and both
    /// inventories are restored to their state before the day.
    pub fn plan_day(
        &self,
        day_number: u32,
        box_items: &mut Vec<StockItem>,
        main_items: &mut Vec<StockItem>,
    ) -> DayPlan {
        let box_backup = box_items.clone();
        let main_backup = main_items.clone();

        let mut meals = Vec::with_capacity(self.meals.len());
        for requirement in &self.meals {
            let allocation = allocate_meal(box_items, main_items, requirement);
            if allocation.short {
                tracing::debug!(day = day_number, meal = %requirement.meal_time, "day short, rolling back");
                *box_items = box_backup;
                *main_items = main_backup;
                return DayPlan {
                    day_number,
                    meals: Vec::new(),
                    day_box_usage: None,
                    day_main_usage: None,
                };
            }
            meals.push(Meal {
                meal_time: requirement.meal_time.clone(),
                meal_plan_requirements: requirement.requirements.clone(),
                used_items: allocation.used,
            });
        }

        let usage = summarize_day_usage(&meals);
        DayPlan {
            day_number,
            meals,
            day_box_usage: Some(usage.box_usage),
            day_main_usage: Some(usage.main_usage),
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::from_config(&MealboxConfig::default())
    }
}
