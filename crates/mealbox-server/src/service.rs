//! The plan-producing seam between HTTP handlers and the workbooks.

use mealbox_common::config::MealboxConfig;
use mealbox_common::error::Result;
use mealbox_common::types::Month;
use mealbox_inventory::store::DataStore;
use mealbox_planner::plan::{MonthlyPlan, Planner};

/// Produces monthly plans. Implementations may block.
pub trait PlanService: Send + Sync + 'static {
    /// Builds the plan for `month`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan inputs cannot be obtained.
    fn monthly_plan(&self, month: Month) -> Result<MonthlyPlan>;
}

/// Plans against the workbooks in the configured data directory.
#[derive(Debug)]
pub struct WorkbookPlanner {
    store: DataStore,
    planner: Planner,
}

impl WorkbookPlanner {
    /// Creates a planner reading the workbooks named in `config`.
    #[must_use]
    pub fn from_config(config: &MealboxConfig) -> Self {
        Self {
            store: DataStore::new(config.data.clone(), config.categories.clone()),
            planner: Planner::from_config(config),
        }
    }
}

impl PlanService for WorkbookPlanner {
    fn monthly_plan(&self, month: Month) -> Result<MonthlyPlan> {
        let inputs = self.store.inputs(month.cycle())?;
        Ok(self.planner.monthly_plan(month, inputs))
    }
}
