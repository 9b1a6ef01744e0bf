//! Response types for the Tuttle API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from [`TuttleError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TuttleError;
use crate::models::{AuditStep, Status, StatusPriority};

/// Response body for the `/tax/income` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxResponse {
    /// The country whose tariff was applied.
    pub country: String,
    /// The taxable income from the request.
    pub taxable_income: Decimal,
    /// The tax owed, rounded to whole units.
    pub income_tax: Decimal,
    /// Zero-based index of the applied bracket.
    pub bracket_index: usize,
    /// How the figure was reached.
    pub audit_step: AuditStep,
}

/// Response body for the `/status/classify` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// The classified status.
    pub status: Status,
    /// Whether the window ends after `today`.
    pub is_active: bool,
    /// Whether the window starts after `today`.
    pub is_upcoming: bool,
    /// The reference day used.
    pub today: NaiveDate,
    /// The rule order used.
    pub priority: StatusPriority,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TuttleError> for ApiErrorResponse {
    fn from(error: TuttleError) -> Self {
        let message = error.to_string();
        match error {
            TuttleError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            TuttleError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            TuttleError::InvalidTaxTable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid tax table", message),
            },
            TuttleError::UnsupportedCountry { country } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_COUNTRY",
                    message,
                    format!("No income tax tariff is configured for '{}'", country),
                ),
            },
            TuttleError::InvalidLifecycleWindow { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_LIFECYCLE_WINDOW",
                    message,
                    "The end date must not be before the start date",
                ),
            },
            TuttleError::InvalidInvoiceItem { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_INVOICE_ITEM", message),
            },
            TuttleError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
