//! End-to-end HTTP tests against workbooks written to a scratch directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use mealbox_common::config::{DataConfig, MealboxConfig};
use mealbox_server::routes::{AppState, router};
use mealbox_server::service::WorkbookPlanner;
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use tower::ServiceExt;

fn write_sheet(path: &Path, sheet_names: &[&str], header: &[&str], rows: &[(&str, f64)]) {
    let mut workbook = Workbook::new();
    for name in sheet_names {
        let sheet = workbook.add_worksheet();
        let _ = sheet.set_name(*name).unwrap();
        for (c, title) in header.iter().enumerate() {
            let _ = sheet.write_string(0, u16::try_from(c).unwrap(), *title).unwrap();
        }
        for (r, (item, value)) in rows.iter().enumerate() {
            let r = u32::try_from(r + 1).unwrap();
            let _ = sheet.write_string(r, 0, *item).unwrap();
            let _ = sheet.write_number(r, 1, *value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn write_reference(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let rows = [
        ["item_name", "item_category", "servings_per_unit"],
        ["Apple", "Seasonal & Local Fruits/Vegetables", "1"],
        ["Oats", "Grains", "1"],
        ["Milk", "Milk & Dairy", "1"],
        ["Beans", "Meat/Fish/Eggs/Pulses", "1"],
        ["Oil", "Oil", "1"],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let _ = sheet
                .write_string(u32::try_from(r).unwrap(), u16::try_from(c).unwrap(), *value)
                .unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// Box stock for `days` days in every cycle month, nothing in main.
fn write_data(dir: &Path, days: f64) {
    write_reference(&dir.join("DATA SET FOOD CATEGORY.xlsx"));
    write_sheet(
        &dir.join("senior_box.xlsx"),
        &["Senior Box First Month", "Senior Box Second Month", "Senior Box Third Month"],
        &["item_name", "quantity"],
        &[
            ("Apple", 5.0 * days),
            ("Oats", 4.0 * days),
            ("Milk", 2.0 * days),
            ("Beans", days),
            ("Oil", 3.0 * days),
        ],
    );
    write_sheet(
        &dir.join("excel_file.xlsx"),
        &["Inventory"],
        &["item_name", "quantity_in_stock"],
        &[("Apple", 0.0)],
    );
}

fn app(dir: &Path) -> axum::Router {
    let config = MealboxConfig {
        data: DataConfig {
            dir: dir.to_path_buf(),
            ..DataConfig::default()
        },
        ..MealboxConfig::default()
    };
    router(AppState::new(WorkbookPlanner::from_config(&config)))
}

async fn post(app: axum::Router, body: &'static str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate_monthly_plan")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn sufficient_inventory_serves_all_thirty_days() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), 30.0);

    let (status, json) = post(app(dir.path()), r#"{"month": 4}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cycle_month"], 1);
    assert_eq!(json["senior_box_items_for_month"].as_array().unwrap().len(), 5);
    assert_eq!(json["all_shortages"], Value::Array(Vec::new()));
    let days = json["final_daily_plan"].as_array().unwrap();
    assert_eq!(days.len(), 30);
    assert!(days.iter().all(|d| d["meals"].as_array().unwrap().len() == 3));
}

#[tokio::test]
async fn shortage_days_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), 12.0);

    let (status, json) = post(app(dir.path()), r#"{"month": 6}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cycle_month"], 3);
    let details = json["all_shortages"][0]["details"].as_array().unwrap();
    assert_eq!(details.len(), 18);
    assert_eq!(details[0]["day_number"], 13);
    let day13 = &json["final_daily_plan"][12];
    assert_eq!(day13["meals"], Value::Array(Vec::new()));
    assert!(day13.get("day_main_usage").is_none());
}

#[tokio::test]
async fn missing_workbooks_return_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = post(app(dir.path()), r#"{"month": 1}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("cannot find"));
}

#[tokio::test]
async fn missing_inventory_column_returns_server_error() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), 1.0);
    write_sheet(
        &dir.path().join("excel_file.xlsx"),
        &["Inventory"],
        &["item_name", "stock"],
        &[("Apple", 1.0)],
    );
    let (status, json) = post(app(dir.path()), "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("quantity_in_stock"));
}
