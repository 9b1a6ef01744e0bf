//! Configuration types for the Tuttle business core.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::calculation::GERMANY;
use crate::models::StatusPriority;

/// User preferences from `settings.yaml`.
///
/// Fields missing from the file take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Country whose income tax tariff is applied by default.
    pub country: String,
    /// ISO code of the default currency.
    pub currency: String,
    /// Rule order used when classifying contracts and projects.
    pub status_priority: StatusPriority,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            country: GERMANY.to_string(),
            currency: "EUR".to_string(),
            status_priority: StatusPriority::default(),
        }
    }
}
