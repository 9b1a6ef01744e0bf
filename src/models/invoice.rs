//! Invoice item and totals models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TimeUnit;
use crate::error::{TuttleError, TuttleResult};

/// A single billed line on an invoice.
///
/// # Example
///
/// ```
/// use tuttle::models::{InvoiceItem, TimeUnit};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = InvoiceItem {
///     description: "Consulting".to_string(),
///     quantity: Decimal::from_str("10").unwrap(),
///     unit: TimeUnit::Hour,
///     unit_price: Decimal::from_str("85.50").unwrap(),
///     vat_rate: Decimal::from_str("0.19").unwrap(),
/// };
/// assert_eq!(item.subtotal().unwrap(), Decimal::from_str("855.00").unwrap());
/// assert_eq!(item.vat().unwrap(), Decimal::from_str("162.45").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// What was delivered.
    pub description: String,
    /// Number of units billed.
    pub quantity: Decimal,
    /// The unit the quantity is measured in.
    pub unit: TimeUnit,
    /// Price per unit.
    pub unit_price: Decimal,
    /// VAT rate applied to this item (e.g. 0.19).
    pub vat_rate: Decimal,
}

impl InvoiceItem {
    /// Returns `quantity * unit_price`.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::CalculationError`] if the product overflows.
    pub fn subtotal(&self) -> TuttleResult<Decimal> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or_else(|| self.overflow("subtotal"))
    }

    /// Returns the VAT owed on this item.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::CalculationError`] if the subtotal or the VAT
    /// overflows.
    pub fn vat(&self) -> TuttleResult<Decimal> {
        self.subtotal()?
            .checked_mul(self.vat_rate)
            .ok_or_else(|| self.overflow("VAT"))
    }

    fn overflow(&self, what: &str) -> TuttleError {
        TuttleError::CalculationError {
            message: format!("{} of '{}' overflows", what, self.description),
        }
    }
}

/// Aggregated totals of an invoice, rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all item subtotals (net).
    pub sum: Decimal,
    /// Sum of all item VAT amounts.
    pub vat_total: Decimal,
    /// `sum + vat_total` (gross).
    pub total: Decimal,
}
