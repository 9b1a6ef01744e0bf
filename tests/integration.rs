//! Integration tests for the Tuttle business core.
//!
//! This test suite covers the API surface end to end:
//! - Income tax per bracket, with the configured and explicit countries
//! - Unsupported countries
//! - Lifecycle classification under both rule orders
//! - Boundary days for the active and upcoming rules
//! - Invoice totals
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use tuttle::api::{AppState, create_router};
use tuttle::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/tuttle").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn income_tax(income: &str, country: Option<&str>) -> (StatusCode, Value) {
    let mut body = json!({ "taxable_income": income });
    if let Some(country) = country {
        body["country"] = json!(country);
    }
    post(create_router_for_test(), "/tax/income", body).await
}

async fn classify(start: &str, end: &str, completed: bool, priority: Option<&str>) -> Value {
    let mut body = json!({
        "start_date": start,
        "end_date": end,
        "is_completed": completed,
        "today": "2024-06-15"
    });
    if let Some(priority) = priority {
        body["priority"] = json!(priority);
    }
    let (status, json) = post(create_router_for_test(), "/status/classify", body).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", json);
    json
}

fn tax_of(body: &Value) -> Decimal {
    decimal(body["income_tax"].as_str().unwrap())
}

// =============================================================================
// Income tax
// =============================================================================

#[tokio::test]
async fn test_income_tax_zero_bracket() {
    for income in ["0", "1", "9407.99", "9408"] {
        let (status, body) = income_tax(income, Some("Germany")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tax_of(&body), Decimal::ZERO, "income {}", income);
        assert_eq!(body["bracket_index"], 0);
    }
}

#[tokio::test]
async fn test_income_tax_per_bracket() {
    let cases = [
        ("10000", "86", 1),
        ("50000", "12142", 2),
        ("100000", "33036", 3),
        ("300000", "117921", 4),
    ];

    for (income, expected, bracket) in cases {
        let (status, body) = income_tax(income, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tax_of(&body), decimal(expected), "income {}", income);
        assert_eq!(body["bracket_index"], bracket);
        assert_eq!(body["country"], "Germany");
    }
}

#[tokio::test]
async fn test_income_tax_audit_step_explains_result() {
    let (_, body) = income_tax("50000", None).await;
    let step = &body["audit_step"];

    assert_eq!(step["rule_id"], "income_tax");
    assert_eq!(step["output"]["unrounded"], "12141.6367266848");
    assert_eq!(step["output"]["rounding"], "half_even");
}

#[tokio::test]
async fn test_income_tax_rounds_half_to_even() {
    let (_, body) = income_tax("60072", None).await;
    assert_eq!(tax_of(&body), decimal("16266"));
}

#[tokio::test]
async fn test_income_tax_unsupported_country() {
    for country in ["France", "germany", ""] {
        let (status, body) = income_tax("50000", Some(country)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_COUNTRY");
    }
}

#[tokio::test]
async fn test_income_tax_accepts_numeric_income() {
    let (status, body) = post(
        create_router_for_test(),
        "/tax/income",
        json!({ "taxable_income": 100000 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tax_of(&body), decimal("33036"));
}

// =============================================================================
// Lifecycle classification (today = 2024-06-15)
// =============================================================================

#[tokio::test]
async fn test_running_window_is_active() {
    let body = classify("2024-01-01", "2024-12-31", false, None).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["is_upcoming"], false);
}

#[tokio::test]
async fn test_future_window_under_both_priorities() {
    let body = classify("2025-01-01", "2025-12-31", false, None).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["priority"], "end_date_first");

    let body = classify("2025-01-01", "2025-12-31", false, Some("start_date_first")).await;
    assert_eq!(body["status"], "upcoming");
    assert_eq!(body["priority"], "start_date_first");
}

#[tokio::test]
async fn test_past_completed_window_is_completed() {
    let body = classify("2023-01-01", "2023-12-31", true, None).await;
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_past_open_window_falls_back_to_all() {
    let body = classify("2023-01-01", "2023-12-31", false, None).await;
    assert_eq!(body["status"], "all");
}

#[tokio::test]
async fn test_boundary_days() {
    let body = classify("2024-01-01", "2024-06-15", false, None).await;
    assert_eq!(body["is_active"], false);

    let body = classify("2024-06-15", "2024-06-15", false, None).await;
    assert_eq!(body["is_upcoming"], false);
    assert_eq!(body["status"], "all");

    let body = classify("2024-06-16", "2024-06-16", false, Some("start_date_first")).await;
    assert_eq!(body["is_upcoming"], true);
    assert_eq!(body["status"], "upcoming");
}

#[tokio::test]
async fn test_classify_without_today_uses_current_date() {
    let (status, body) = post(
        create_router_for_test(),
        "/status/classify",
        json!({ "start_date": "2000-01-01", "end_date": "2000-12-31", "is_completed": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert!(body["today"].as_str().unwrap() > "2000-12-31");
}

#[tokio::test]
async fn test_classify_rejects_inverted_window() {
    let (status, body) = post(
        create_router_for_test(),
        "/status/classify",
        json!({ "start_date": "2024-07-01", "end_date": "2024-06-01", "today": "2024-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_LIFECYCLE_WINDOW");
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn test_invoice_totals_mixed_vat() {
    let (status, body) = post(
        create_router_for_test(),
        "/invoice/totals",
        json!({
            "items": [
                {"description": "Development", "quantity": "8", "unit": "hour", "unit_price": "100", "vat_rate": "0.19"},
                {"description": "Travel day", "quantity": "1", "unit": "day", "unit_price": "100", "vat_rate": "0.07"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(body["sum"].as_str().unwrap()), decimal("900"));
    assert_eq!(decimal(body["vat_total"].as_str().unwrap()), decimal("159"));
    assert_eq!(decimal(body["total"].as_str().unwrap()), decimal("1059"));
}

#[tokio::test]
async fn test_invoice_totals_rejects_negative_quantity() {
    let (status, body) = post(
        create_router_for_test(),
        "/invoice/totals",
        json!({
            "items": [
                {"description": "Refund", "quantity": "-1", "unit": "hour", "unit_price": "100", "vat_rate": "0.19"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INVOICE_ITEM");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tax/income")
                .body(Body::from(json!({"taxable_income": "1"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tax/vat")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
