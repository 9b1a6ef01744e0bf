//! Core data models for the Tuttle business core.
//!
//! This module contains the domain values consumed by the calculation
//! functions: lifecycle windows, contracts, projects and invoice items.

mod audit;
mod contract;
mod invoice;
mod lifecycle;
mod project;

pub use audit::AuditStep;
pub use contract::{Contract, Cycle, TimeUnit};
pub use invoice::{InvoiceItem, InvoiceTotals};
pub use lifecycle::{Lifecycle, LifecycleWindow, Status, StatusPriority};
pub use project::Project;
