//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading user settings
//! and income tax tables from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{TaxCalculator, TaxTable};
use crate::error::{TuttleError, TuttleResult};

use super::types::Settings;

/// Loads and provides access to the application configuration.
///
/// # Directory Structure
///
/// ```text
/// config/tuttle/
/// ├── settings.yaml      # country, currency, status priority
/// └── tax_tables/
///     └── germany.yaml   # one tax table per file
/// ```
///
/// # Example
///
/// ```no_run
/// use tuttle::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/tuttle").unwrap();
/// let tax = loader.income_tax(Decimal::from(50_000), None).unwrap();
/// println!("Income tax in {}: {}", loader.settings().country, tax);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    calculator: TaxCalculator,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConfigLoader {
    /// Returns the default settings with the built-in tax tables.
    pub fn builtin() -> Self {
        Self {
            settings: Settings::default(),
            calculator: TaxCalculator::default(),
        }
    }

    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/tuttle")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `settings.yaml` or the `tax_tables` directory is missing
    /// - Any file contains invalid YAML or an invalid tax table
    /// - Two files declare a table for the same country
    pub fn load<P: AsRef<Path>>(path: P) -> TuttleResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        let calculator = Self::load_tax_tables(&path.join("tax_tables"))?;

        debug!(
            path = %path.display(),
            country = %settings.country,
            countries = ?calculator.countries(),
            "Configuration loaded"
        );

        Ok(Self {
            settings,
            calculator,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> TuttleResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TuttleError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| TuttleError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every `.yaml` table in the directory into a calculator.
    fn load_tax_tables(tables_dir: &Path) -> TuttleResult<TaxCalculator> {
        let tables_dir_str = tables_dir.display().to_string();

        let entries = fs::read_dir(tables_dir).map_err(|_| TuttleError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| TuttleError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(TuttleError::ConfigNotFound {
                path: format!("{} (no tax tables found)", tables_dir_str),
            });
        }

        let mut calculator = TaxCalculator::empty();
        for path in paths {
            let table = Self::load_yaml::<TaxTable>(&path)?;
            debug!(
                path = %path.display(),
                country = table.country(),
                brackets = table.brackets().len(),
                "Tax table loaded"
            );
            if let Some(previous) = calculator.register(table) {
                return Err(TuttleError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate tax table for country '{}'", previous.country()),
                });
            }
        }

        Ok(calculator)
    }

    /// Returns the user settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the configured tax calculator.
    pub fn tax_calculator(&self) -> &TaxCalculator {
        &self.calculator
    }

    /// Computes income tax for `country`, or for the configured country if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::UnsupportedCountry`] if no table is loaded for
    /// the country.
    pub fn income_tax(&self, taxable_income: Decimal, country: Option<&str>) -> TuttleResult<Decimal> {
        let country = country.unwrap_or(&self.settings.country);
        self.calculator.income_tax(taxable_income, country)
    }
}
