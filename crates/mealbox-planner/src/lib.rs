//! Meal plan generation for the senior food box.
//!
//! Servings are drawn from the month's senior box first and the main
//! inventory second. A day either meets every meal's requirements or is
//! reported as a shortage and leaves the inventories untouched.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod allocation;
pub mod plan;
pub mod summary;
