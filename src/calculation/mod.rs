//! Calculation logic for the Tuttle business core.
//!
//! This module contains the pure business rules consumed by the
//! presentation layer: lifecycle status classification for contracts and
//! projects, progressive income tax, and invoice totals.

mod invoice;
mod status;
mod tax;

pub use invoice::{calculate_invoice_totals, invoice_item_for_contract, invoice_number};
pub use status::{
    classify_lifecycle, classify_lifecycle_with, count_by_status, filter_by_status, is_active,
    is_upcoming,
};
pub use tax::{GERMANY, IncomeTaxResult, TaxBracket, TaxCalculator, TaxTable, income_tax};
