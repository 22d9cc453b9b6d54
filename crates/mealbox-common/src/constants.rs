//! Service-wide constants and default paths.

/// Default address the HTTP server binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port declared by the container image and bound by `mealbox serve`.
pub const DEFAULT_PORT: u16 = 5001;

/// Directory holding the workbooks, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Workbook mapping item names to raw categories and servings per unit.
pub const FOOD_REFERENCE_FILE: &str = "DATA SET FOOD CATEGORY.xlsx";

/// Workbook with one sheet per month of the senior box cycle.
pub const SENIOR_BOX_FILE: &str = "senior_box.xlsx";

/// Workbook holding the main pantry inventory.
pub const MAIN_INVENTORY_FILE: &str = "excel_file.xlsx";

/// Sheet of [`MAIN_INVENTORY_FILE`] holding the stock levels.
pub const MAIN_INVENTORY_SHEET: &str = "Inventory";

/// Senior box sheets, indexed by cycle month minus one.
pub const SENIOR_BOX_SHEETS: [&str; 3] = [
    "Senior Box First Month",
    "Senior Box Second Month",
    "Senior Box Third Month",
];

/// Number of months in one senior box rotation.
pub const BOX_CYCLE_MONTHS: i64 = 3;

/// Days planned for each requested month.
pub const PLAN_DAYS: u32 = 30;

/// Longest plan a configuration may request.
pub const MAX_PLAN_DAYS: u32 = 366;

/// Message recorded for a day the inventories cannot cover.
pub const SHORTAGE_MESSAGE: &str = "Not enough box+main inventory to fulfill 5-4-3-2-1 plan";

/// Shortage report type tag.
pub const SHORTAGE_KIND: &str = "meal_plan_shortage";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "mealbox";
