//! Error types for the Tuttle business core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while classifying lifecycles,
//! computing taxes, or totalling invoices.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Tuttle business core.
///
/// All fallible operations return this error type, so callers can tell an
/// unsupported country apart from a configuration or computation failure.
///
/// # Example
///
/// ```
/// use tuttle::error::TuttleError;
///
/// let error = TuttleError::UnsupportedCountry {
///     country: "France".to_string(),
/// };
/// assert_eq!(error.to_string(), "Income tax not implemented for country: France");
/// ```
#[derive(Debug, Error)]
pub enum TuttleError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No income tax formula is registered for the requested country.
    #[error("Income tax not implemented for country: {country}")]
    UnsupportedCountry {
        /// The country that was requested.
        country: String,
    },

    /// A tax table is structurally invalid.
    #[error("Invalid tax table for '{country}': {message}")]
    InvalidTaxTable {
        /// The country the table was declared for.
        country: String,
        /// A description of what made the table invalid.
        message: String,
    },

    /// A lifecycle window ends before it starts.
    #[error(
        "Invalid lifecycle window: end date {end_date} is before start date {start_date}"
    )]
    InvalidLifecycleWindow {
        /// The start date of the window.
        start_date: NaiveDate,
        /// The end date of the window.
        end_date: NaiveDate,
    },

    /// An invoice item carried inconsistent data.
    #[error("Invalid invoice item '{description}': {message}")]
    InvalidInvoiceItem {
        /// The description of the offending item.
        description: String,
        /// A description of what made the item invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return TuttleError.
pub type TuttleResult<T> = Result<T, TuttleError>;
