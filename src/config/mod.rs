//! Configuration loading and management for the Tuttle business core.
//!
//! This module loads user settings and per-country income tax tables from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use tuttle::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/tuttle").unwrap();
//! println!("Taxes computed for: {}", config.settings().country);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::Settings;
