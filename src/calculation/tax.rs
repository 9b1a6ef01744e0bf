//! Progressive income tax calculation.
//!
//! Tax formulas are expressed as data. Every bracket computes
//!
//! ```text
//! (linear_rate + quadratic_rate * x) * x + base_amount,   x = income - offset
//! ```
//!
//! which covers both the flat-rate zones and the linearly-progressive zones
//! of the German income tax tariff. Tables are registered per country in a
//! [`TaxCalculator`]; asking for any other country fails with
//! [`TuttleError::UnsupportedCountry`].

use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{TuttleError, TuttleResult};
use crate::models::AuditStep;

/// Country name under which the built-in German table is registered.
pub const GERMANY: &str = "Germany";

static BUILTIN: LazyLock<TaxCalculator> = LazyLock::new(TaxCalculator::default);

/// One zone of a progressive tax tariff.
///
/// The bracket applies to incomes up to and including `upper_bound`, or to
/// all remaining incomes when `upper_bound` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper income bound; `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Income subtracted before the rates are applied.
    #[serde(default)]
    pub offset: Decimal,
    /// Marginal rate at the start of the bracket.
    #[serde(default)]
    pub linear_rate: Decimal,
    /// Growth of the marginal rate per unit of income above `offset`.
    #[serde(default)]
    pub quadratic_rate: Decimal,
    /// Amount added after the rates are applied (may be negative).
    #[serde(default)]
    pub base_amount: Decimal,
}

impl TaxBracket {
    fn applies_to(&self, taxable_income: Decimal) -> bool {
        self.upper_bound.is_none_or(|upper| taxable_income <= upper)
    }

    fn tax(&self, taxable_income: Decimal) -> Option<Decimal> {
        let x = taxable_income.checked_sub(self.offset)?;
        let rate = self.quadratic_rate.checked_mul(x)?.checked_add(self.linear_rate)?;
        rate.checked_mul(x)?.checked_add(self.base_amount)
    }
}

/// The complete tariff for one country.
///
/// Tables are validated on construction and on deserialization: they need
/// at least one bracket, strictly ascending upper bounds, and an unbounded
/// final bracket so that every income is covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxTableFields")]
pub struct TaxTable {
    country: String,
    brackets: Vec<TaxBracket>,
}

#[derive(Deserialize)]
struct TaxTableFields {
    country: String,
    brackets: Vec<TaxBracket>,
}

impl TryFrom<TaxTableFields> for TaxTable {
    type Error = TuttleError;

    fn try_from(fields: TaxTableFields) -> TuttleResult<Self> {
        Self::new(fields.country, fields.brackets)
    }
}

impl TaxTable {
    /// Creates a validated tax table.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::InvalidTaxTable`] if the brackets are empty,
    /// not strictly ascending, or leave incomes uncovered.
    pub fn new(country: impl Into<String>, brackets: Vec<TaxBracket>) -> TuttleResult<Self> {
        let country = country.into();
        let invalid = |message: String| TuttleError::InvalidTaxTable {
            country: country.clone(),
            message,
        };

        let Some((last, bounded)) = brackets.split_last() else {
            return Err(invalid("no brackets defined".to_string()));
        };

        if last.upper_bound.is_some() {
            return Err(invalid("the last bracket must have no upper bound".to_string()));
        }

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in bounded.iter().enumerate() {
            let Some(upper) = bracket.upper_bound else {
                return Err(invalid(format!(
                    "bracket {} has no upper bound but is not the last bracket",
                    index + 1
                )));
            };
            if previous.is_some_and(|p| upper <= p) {
                return Err(invalid(format!(
                    "upper bound {} of bracket {} is not above the previous bracket",
                    upper,
                    index + 1
                )));
            }
            previous = Some(upper);
        }

        Ok(Self { country, brackets })
    }

    /// The German income tax tariff.
    ///
    /// | Taxable income (EUR) | Tax |
    /// |---|---|
    /// | up to 9408 | 0 |
    /// | 9409 to 14532 | (0.14 + (ti - 9408) * 972.87e-8) * (ti - 9408) |
    /// | 14533 to 57051 | (0.2397 + (ti - 14532) * 212.02e-8) * (ti - 14532) + 972.79 |
    /// | 57052 to 270500 | 0.42 * ti - 8963.74 |
    /// | above 270500 | 0.45 * ti - 17078.74 |
    pub fn germany() -> Self {
        let bracket = |upper: Option<i64>,
                       offset: i64,
                       linear_rate: Decimal,
                       quadratic_rate: Decimal,
                       base_amount: Decimal| TaxBracket {
            upper_bound: upper.map(Decimal::from),
            offset: Decimal::from(offset),
            linear_rate,
            quadratic_rate,
            base_amount,
        };

        Self {
            country: GERMANY.to_string(),
            brackets: vec![
                bracket(Some(9408), 0, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
                bracket(
                    Some(14532),
                    9408,
                    Decimal::new(14, 2),
                    Decimal::new(97287, 10),
                    Decimal::ZERO,
                ),
                bracket(
                    Some(57051),
                    14532,
                    Decimal::new(2397, 4),
                    Decimal::new(21202, 10),
                    Decimal::new(97279, 2),
                ),
                bracket(
                    Some(270500),
                    0,
                    Decimal::new(42, 2),
                    Decimal::ZERO,
                    Decimal::new(-896374, 2),
                ),
                bracket(None, 0, Decimal::new(45, 2), Decimal::ZERO, Decimal::new(-1707874, 2)),
            ],
        }
    }

    /// Returns the country this table applies to.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the zero-based index and bracket that `taxable_income` falls into.
    pub fn bracket_for(&self, taxable_income: Decimal) -> (usize, &TaxBracket) {
        self.brackets
            .iter()
            .enumerate()
            .find(|(_, bracket)| bracket.applies_to(taxable_income))
            // Validation guarantees an unbounded last bracket.
            .unwrap_or_else(|| (self.brackets.len() - 1, &self.brackets[self.brackets.len() - 1]))
    }
}

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    /// The tax owed, rounded to whole currency units (half to even).
    pub income_tax: Decimal,
    /// The tax owed before rounding.
    pub unrounded: Decimal,
    /// Zero-based index of the bracket that was applied.
    pub bracket_index: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// A registry of per-country tax tables.
///
/// [`TaxCalculator::default`] knows only Germany. Further tables can be
/// registered, typically from configuration.
///
/// # Example
///
/// ```
/// use tuttle::calculation::{TaxCalculator, GERMANY};
/// use tuttle::error::TuttleError;
/// use rust_decimal::Decimal;
///
/// let calculator = TaxCalculator::default();
/// assert_eq!(
///     calculator.income_tax(Decimal::from(100_000), GERMANY).unwrap(),
///     Decimal::from(33036)
/// );
/// assert!(matches!(
///     calculator.income_tax(Decimal::from(100_000), "France"),
///     Err(TuttleError::UnsupportedCountry { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    tables: HashMap<String, TaxTable>,
}

impl Default for TaxCalculator {
    fn default() -> Self {
        let mut calculator = Self::empty();
        calculator.register(TaxTable::germany());
        calculator
    }
}

impl TaxCalculator {
    /// Creates a calculator with no tables registered.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Registers a table, replacing and returning any previous table for the country.
    pub fn register(&mut self, table: TaxTable) -> Option<TaxTable> {
        self.tables.insert(table.country.clone(), table)
    }

    /// Returns the names of all supported countries, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let mut countries: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        countries.sort_unstable();
        countries
    }

    /// Returns the table for a country.
    ///
    /// Country names are matched exactly, including case.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::UnsupportedCountry`] if no table is registered.
    pub fn table(&self, country: &str) -> TuttleResult<&TaxTable> {
        self.tables
            .get(country)
            .ok_or_else(|| TuttleError::UnsupportedCountry {
                country: country.to_string(),
            })
    }

    /// Computes the income tax owed, rounded to whole units.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::UnsupportedCountry`] for unknown countries and
    /// [`TuttleError::CalculationError`] if the arithmetic overflows.
    pub fn income_tax(&self, taxable_income: Decimal, country: &str) -> TuttleResult<Decimal> {
        self.calculate(taxable_income, country, 1)
            .map(|result| result.income_tax)
    }

    /// Computes the income tax owed and records how it was reached.
    ///
    /// Incomes at or below zero fall into the first bracket.
    ///
    /// # Arguments
    ///
    /// * `taxable_income` - The taxable income
    /// * `country` - The country whose tariff applies
    /// * `step_number` - The step number for audit trail sequencing
    pub fn calculate(
        &self,
        taxable_income: Decimal,
        country: &str,
        step_number: u32,
    ) -> TuttleResult<IncomeTaxResult> {
        let table = self.table(country)?;
        let (bracket_index, bracket) = table.bracket_for(taxable_income);

        let tax = bracket
            .tax(taxable_income)
            .ok_or_else(|| TuttleError::CalculationError {
                message: format!(
                    "income tax for {} in {} overflows",
                    taxable_income, country
                ),
            })?;
        let unrounded = if tax.is_zero() { Decimal::ZERO } else { tax };
        let income_tax = unrounded.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

        let x = taxable_income - bracket.offset;
        let audit_step = AuditStep {
            step_number,
            rule_id: "income_tax".to_string(),
            rule_name: "Income Tax".to_string(),
            input: serde_json::json!({
                "taxable_income": taxable_income.normalize().to_string(),
                "country": country
            }),
            output: serde_json::json!({
                "bracket": bracket_index + 1,
                "unrounded": unrounded.normalize().to_string(),
                "income_tax": income_tax.to_string(),
                "rounding": "half_even"
            }),
            reasoning: format!(
                "{} falls in bracket {} of {} for {}: ({} + {} x {}) x {} + {} = {}, rounded to {}",
                taxable_income.normalize(),
                bracket_index + 1,
                table.brackets.len(),
                country,
                bracket.linear_rate.normalize(),
                bracket.quadratic_rate.normalize(),
                x.normalize(),
                x.normalize(),
                bracket.base_amount.normalize(),
                unrounded.normalize(),
                income_tax
            ),
        };

        Ok(IncomeTaxResult {
            income_tax,
            unrounded,
            bracket_index,
            audit_step,
        })
    }
}

/// Computes the income tax owed using the built-in tables.
///
/// Only Germany is built in.
///
/// # Errors
///
/// Returns [`TuttleError::UnsupportedCountry`] for any other country.
///
/// # Example
///
/// ```
/// use tuttle::calculation::income_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(income_tax(Decimal::from(9408), "Germany").unwrap(), Decimal::ZERO);
/// assert_eq!(income_tax(Decimal::from(50_000), "Germany").unwrap(), Decimal::from(12142));
/// assert!(income_tax(Decimal::from(50_000), "France").is_err());
/// ```
pub fn income_tax(taxable_income: Decimal, country: &str) -> TuttleResult<Decimal> {
    BUILTIN.income_tax(taxable_income, country)
}
