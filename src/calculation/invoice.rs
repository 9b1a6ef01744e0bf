//! Invoice calculation functionality.
//!
//! This module turns contract terms into invoice items and aggregates items
//! into net, VAT and gross totals.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{TuttleError, TuttleResult};
use crate::models::{Contract, InvoiceItem, InvoiceTotals};

fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

fn validate_item(item: &InvoiceItem) -> TuttleResult<()> {
    let fields = [
        ("quantity", item.quantity),
        ("unit price", item.unit_price),
        ("VAT rate", item.vat_rate),
    ];

    for (name, value) in fields {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TuttleError::InvalidInvoiceItem {
                description: item.description.clone(),
                message: format!("{} must not be negative", name),
            });
        }
    }

    Ok(())
}

/// Creates an invoice item billed at a contract's rate, unit and VAT rate.
///
/// # Example
///
/// ```
/// use tuttle::calculation::invoice_item_for_contract;
/// use tuttle::models::{Contract, LifecycleWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = LifecycleWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     false,
/// )
/// .unwrap();
/// let contract = Contract::new("Backend work", "Sample Corp", window, Decimal::new(100, 0), "EUR");
///
/// let item = invoice_item_for_contract(&contract, Decimal::new(12, 0), "January");
/// assert_eq!(item.subtotal().unwrap(), Decimal::new(1200, 0));
/// ```
pub fn invoice_item_for_contract(
    contract: &Contract,
    quantity: Decimal,
    description: impl Into<String>,
) -> InvoiceItem {
    InvoiceItem {
        description: description.into(),
        quantity,
        unit: contract.unit,
        unit_price: contract.rate,
        vat_rate: contract.vat_rate,
    }
}

/// Totals a list of invoice items.
///
/// Net sum and VAT are accumulated exactly and rounded to cents (half to
/// even) once at the end; the gross total is the sum of the two rounded
/// figures.
///
/// # Errors
///
/// Returns [`TuttleError::InvalidInvoiceItem`] if any item has a negative
/// quantity, unit price or VAT rate, and [`TuttleError::CalculationError`]
/// on overflow.
///
/// # Example
///
/// ```
/// use tuttle::calculation::calculate_invoice_totals;
/// use tuttle::models::{InvoiceItem, TimeUnit};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let items = vec![InvoiceItem {
///     description: "Consulting".to_string(),
///     quantity: Decimal::from_str("10").unwrap(),
///     unit: TimeUnit::Hour,
///     unit_price: Decimal::from_str("85.50").unwrap(),
///     vat_rate: Decimal::from_str("0.19").unwrap(),
/// }];
///
/// let totals = calculate_invoice_totals(&items).unwrap();
/// assert_eq!(totals.sum, Decimal::from_str("855.00").unwrap());
/// assert_eq!(totals.vat_total, Decimal::from_str("162.45").unwrap());
/// assert_eq!(totals.total, Decimal::from_str("1017.45").unwrap());
/// ```
pub fn calculate_invoice_totals(items: &[InvoiceItem]) -> TuttleResult<InvoiceTotals> {
    let overflow = || TuttleError::CalculationError {
        message: "invoice total overflows".to_string(),
    };

    let mut sum = Decimal::ZERO;
    let mut vat_total = Decimal::ZERO;

    for item in items {
        validate_item(item)?;
        let subtotal = item.subtotal()?;
        let vat = item.vat()?;
        sum = sum.checked_add(subtotal).ok_or_else(overflow)?;
        vat_total = vat_total.checked_add(vat).ok_or_else(overflow)?;
    }

    let sum = round_to_cents(sum);
    let vat_total = round_to_cents(vat_total);
    let total = sum.checked_add(vat_total).ok_or_else(overflow)?;

    Ok(InvoiceTotals {
        sum,
        vat_total,
        total,
    })
}

/// Formats an invoice number as `YYYY-MM-DD-NN`.
///
/// `counter` numbers the invoices issued on the same day and is padded to
/// two digits.
///
/// # Example
///
/// ```
/// use tuttle::calculation::invoice_number;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// assert_eq!(invoice_number(date, 2), "2024-03-31-02");
/// ```
pub fn invoice_number(issue_date: NaiveDate, counter: u32) -> String {
    format!("{}-{:02}", issue_date.format("%Y-%m-%d"), counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LifecycleWindow, TimeUnit};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: &str, unit_price: &str, vat_rate: &str) -> InvoiceItem {
        InvoiceItem {
            description: "Consulting".to_string(),
            quantity: dec(quantity),
            unit: TimeUnit::Hour,
            unit_price: dec(unit_price),
            vat_rate: dec(vat_rate),
        }
    }

    #[test]
    fn test_totals_for_single_item() {
        let totals = calculate_invoice_totals(&[item("10", "85.50", "0.19")]).unwrap();
        assert_eq!(totals.sum, dec("855.00"));
        assert_eq!(totals.vat_total, dec("162.45"));
        assert_eq!(totals.total, dec("1017.45"));
    }

    #[test]
    fn test_totals_for_mixed_vat_rates() {
        let items = vec![item("8", "100", "0.19"), item("2.5", "40", "0.07")];
        let totals = calculate_invoice_totals(&items).unwrap();
        assert_eq!(totals.sum, dec("900.00"));
        assert_eq!(totals.vat_total, dec("159.00"));
        assert_eq!(totals.total, dec("1059.00"));
    }

    #[test]
    fn test_totals_round_vat_half_to_even() {
        // 0.25 * 0.1 = 0.025 rounds down to 0.02
        let totals = calculate_invoice_totals(&[item("1", "0.25", "0.1")]).unwrap();
        assert_eq!(totals.vat_total, dec("0.02"));
        // 0.35 * 0.1 = 0.035 rounds up to 0.04
        let totals = calculate_invoice_totals(&[item("1", "0.35", "0.1")]).unwrap();
        assert_eq!(totals.vat_total, dec("0.04"));
    }

    #[test]
    fn test_empty_invoice_totals_zero() {
        let totals = calculate_invoice_totals(&[]).unwrap();
        assert_eq!(totals.sum, Decimal::ZERO);
        assert_eq!(totals.vat_total, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        match calculate_invoice_totals(&[item("-1", "85.50", "0.19")]) {
            Err(TuttleError::InvalidInvoiceItem {
                description,
                message,
            }) => {
                assert_eq!(description, "Consulting");
                assert_eq!(message, "quantity must not be negative");
            }
            other => panic!("expected InvalidInvoiceItem, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_vat_rate_is_rejected() {
        assert!(matches!(
            calculate_invoice_totals(&[item("1", "85.50", "-0.19")]),
            Err(TuttleError::InvalidInvoiceItem { .. })
        ));
    }

    #[test]
    fn test_item_overflow_is_calculation_error() {
        let mut large = item("2", "2", "0.19");
        large.quantity = Decimal::MAX;
        match calculate_invoice_totals(&[item("1", "10", "0.19"), large]) {
            Err(TuttleError::CalculationError { message }) => {
                assert!(message.contains("Consulting"));
            }
            other => panic!("expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_overflow_is_calculation_error() {
        let mut half = item("1", "1", "0");
        half.unit_price = Decimal::MAX;
        assert!(matches!(
            calculate_invoice_totals(&[half.clone(), half]),
            Err(TuttleError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_item_for_contract_uses_contract_terms() {
        let window = LifecycleWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            false,
        )
        .unwrap();
        let contract = Contract::new("Backend work", "Sample Corp", window, dec("750"), "EUR")
            .with_unit(TimeUnit::Day)
            .with_vat_rate(dec("0.07"));

        let item = invoice_item_for_contract(&contract, dec("3"), "March");
        assert_eq!(item.description, "March");
        assert_eq!(item.unit, TimeUnit::Day);
        assert_eq!(item.unit_price, dec("750"));
        assert_eq!(item.vat_rate, dec("0.07"));
        assert_eq!(item.subtotal().unwrap(), dec("2250"));
        assert_eq!(item.vat().unwrap(), dec("157.5"));
    }

    #[test]
    fn test_invoice_number_pads_counter() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(invoice_number(date, 1), "2024-01-05-01");
        assert_eq!(invoice_number(date, 12), "2024-01-05-12");
        assert_eq!(invoice_number(date, 123), "2024-01-05-123");
    }
}
