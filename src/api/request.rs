//! Request types for the Tuttle API.
//!
//! This module defines the JSON request structures for each endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{InvoiceItem, StatusPriority};

/// Request body for the `/tax/income` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxRequest {
    /// The taxable income.
    pub taxable_income: Decimal,
    /// The country whose tariff applies; defaults to the configured country.
    #[serde(default)]
    pub country: Option<String>,
}

/// Request body for the `/status/classify` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// First day of the lifecycle window.
    pub start_date: NaiveDate,
    /// Last day of the lifecycle window.
    pub end_date: NaiveDate,
    /// Whether the entity has been marked as complete.
    #[serde(default)]
    pub is_completed: bool,
    /// The reference day; defaults to the current UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Rule order; defaults to the configured priority.
    #[serde(default)]
    pub priority: Option<StatusPriority>,
}

/// Request body for the `/invoice/totals` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTotalsRequest {
    /// The items to total.
    pub items: Vec<InvoiceItem>,
}
