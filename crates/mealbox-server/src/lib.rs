//! HTTP service for the senior food box meal planner.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod routes;
pub mod service;
pub mod telemetry;
