//! HTTP request handlers for the Tuttle API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_invoice_totals;
use crate::models::LifecycleWindow;

use super::request::{ClassifyRequest, IncomeTaxRequest, InvoiceTotalsRequest};
use super::response::{ApiError, ApiErrorResponse, ClassifyResponse, IncomeTaxResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tax/income", post(income_tax_handler))
        .route("/status/classify", post(classify_handler))
        .route("/invoice/totals", post(invoice_totals_handler))
        .with_state(state)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

/// Handler for POST /tax/income.
async fn income_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<IncomeTaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing income tax request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let country = request
        .country
        .unwrap_or_else(|| config.settings().country.clone());

    let start_time = Instant::now();
    match config
        .tax_calculator()
        .calculate(request.taxable_income, &country, 1)
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                country = %country,
                income_tax = %result.income_tax,
                bracket = result.bracket_index,
                duration_us = start_time.elapsed().as_micros(),
                "Income tax calculated"
            );
            let response = IncomeTaxResponse {
                country,
                taxable_income: request.taxable_income,
                income_tax: result.income_tax,
                bracket_index: result.bracket_index,
                audit_step: result.audit_step,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Income tax calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /status/classify.
async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing status classification request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let window = match LifecycleWindow::new(request.start_date, request.end_date, request.is_completed) {
        Ok(window) => window,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid lifecycle window"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let priority = request
        .priority
        .unwrap_or(state.config().settings().status_priority);
    let status = window.status(today, priority);

    info!(
        correlation_id = %correlation_id,
        status = %status,
        today = %today,
        "Lifecycle classified"
    );

    let response = ClassifyResponse {
        status,
        is_active: window.is_active(today),
        is_upcoming: window.is_upcoming(today),
        today,
        priority,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /invoice/totals.
async fn invoice_totals_handler(
    payload: Result<Json<InvoiceTotalsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice totals request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match calculate_invoice_totals(&request.items) {
        Ok(totals) => {
            info!(
                correlation_id = %correlation_id,
                items_count = request.items.len(),
                total = %totals.total,
                "Invoice totals calculated"
            );
            (StatusCode::OK, Json(totals)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invoice totals calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
