//! Workbook loaders for the mealbox planner.
//!
//! Reads the food reference, the senior box sheet for a cycle month, and the
//! main inventory, and resolves stock quantities into servings per food group.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod fingerprint;
pub mod main_inventory;
pub mod reference;
pub mod senior_box;
pub mod sheet;
pub mod stock;
pub mod store;
pub mod workbook;
