//! HTTP API module for the Tuttle business core.
//!
//! This module exposes the business rules to the presentation layer as a
//! small JSON API: income tax, lifecycle classification and invoice totals.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClassifyRequest, IncomeTaxRequest, InvoiceTotalsRequest};
pub use response::{ApiError, ClassifyResponse, IncomeTaxResponse};
pub use state::AppState;
