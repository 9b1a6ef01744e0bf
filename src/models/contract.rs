//! Contract model and related types.
//!
//! This module defines the [`Contract`] struct together with the billing
//! [`TimeUnit`] and [`Cycle`] enums.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TuttleError, TuttleResult};

use super::{Lifecycle, LifecycleWindow};

/// The unit in which a contract's rate is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    /// Billed per hour worked.
    Hour,
    /// Billed per day worked.
    Day,
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Hour => write!(f, "hour"),
            TimeUnit::Day => write!(f, "day"),
        }
    }
}

/// How often a contract is invoiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cycle {
    /// Invoiced every week.
    Weekly,
    /// Invoiced every month.
    Monthly,
    /// Invoiced every quarter.
    Quarterly,
    /// Invoiced every year.
    Yearly,
}

/// A contract between the freelancer and a client.
///
/// Required fields are taken by [`Contract::new`]; everything else has a
/// default and can be overridden with the `with_*` methods.
///
/// # Example
///
/// ```
/// use tuttle::models::{Contract, Cycle, LifecycleWindow, TimeUnit};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = LifecycleWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     false,
/// )
/// .unwrap();
///
/// let contract = Contract::new("Backend work", "Sample Corp", window, Decimal::new(100, 0), "EUR")
///     .with_unit(TimeUnit::Day)
///     .with_billing_cycle(Cycle::Quarterly)
///     .with_term_of_payment(14);
///
/// let due = contract
///     .payment_due_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
///     .unwrap();
/// assert_eq!(due, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Short title of the contract.
    pub title: String,
    /// Name of the client the contract is with.
    pub client: String,
    /// The contract's start/end dates and completion flag.
    pub window: LifecycleWindow,
    /// The date the contract was signed.
    pub signature_date: NaiveDate,
    /// The agreed rate per [`TimeUnit`].
    pub rate: Decimal,
    /// ISO currency code of the rate.
    pub currency: String,
    /// VAT rate applied on invoices (e.g. 0.19).
    pub vat_rate: Decimal,
    /// The unit the rate is billed in.
    pub unit: TimeUnit,
    /// How many units make up one workday.
    pub units_per_workday: u32,
    /// Optional number of units agreed for the whole contract.
    #[serde(default)]
    pub volume: Option<u32>,
    /// Days between invoice date and payment due date.
    pub term_of_payment: u32,
    /// How often the contract is invoiced.
    pub billing_cycle: Cycle,
}

impl Contract {
    /// Creates a contract with default billing terms.
    ///
    /// Defaults: 19% VAT, hourly billing, 8 units per workday, no volume,
    /// 31 days term of payment, monthly billing, signed on the start date.
    pub fn new(
        title: impl Into<String>,
        client: impl Into<String>,
        window: LifecycleWindow,
        rate: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            client: client.into(),
            signature_date: window.start_date(),
            window,
            rate,
            currency: currency.into(),
            vat_rate: Decimal::new(19, 2),
            unit: TimeUnit::Hour,
            units_per_workday: 8,
            volume: None,
            term_of_payment: 31,
            billing_cycle: Cycle::Monthly,
        }
    }

    /// Sets the signature date.
    pub fn with_signature_date(mut self, signature_date: NaiveDate) -> Self {
        self.signature_date = signature_date;
        self
    }

    /// Sets the VAT rate.
    pub fn with_vat_rate(mut self, vat_rate: Decimal) -> Self {
        self.vat_rate = vat_rate;
        self
    }

    /// Sets the billing unit.
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the number of units per workday.
    pub fn with_units_per_workday(mut self, units: u32) -> Self {
        self.units_per_workday = units;
        self
    }

    /// Sets the agreed volume.
    pub fn with_volume(mut self, volume: u32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Sets the term of payment in days.
    pub fn with_term_of_payment(mut self, days: u32) -> Self {
        self.term_of_payment = days;
        self
    }

    /// Sets the billing cycle.
    pub fn with_billing_cycle(mut self, cycle: Cycle) -> Self {
        self.billing_cycle = cycle;
        self
    }

    /// Marks the contract as complete.
    pub fn mark_completed(&mut self) {
        self.window.mark_completed();
    }

    /// Returns the date an invoice issued on `issue_date` is due.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::CalculationError`] if the due date falls outside
    /// the supported calendar range.
    pub fn payment_due_date(&self, issue_date: NaiveDate) -> TuttleResult<NaiveDate> {
        issue_date
            .checked_add_days(Days::new(u64::from(self.term_of_payment)))
            .ok_or_else(|| TuttleError::CalculationError {
                message: format!(
                    "payment due date overflows: {} + {} days",
                    issue_date, self.term_of_payment
                ),
            })
    }

    /// Returns the total value of the agreed volume, if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::CalculationError`] if `volume * rate` overflows.
    pub fn volume_value(&self) -> TuttleResult<Option<Decimal>> {
        self.volume
            .map(|volume| {
                Decimal::from(volume)
                    .checked_mul(self.rate)
                    .ok_or_else(|| TuttleError::CalculationError {
                        message: format!("volume value of '{}' overflows", self.title),
                    })
            })
            .transpose()
    }
}

impl Lifecycle for Contract {
    fn window(&self) -> &LifecycleWindow {
        &self.window
    }
}
