//! Tuttle business core
//!
//! This crate provides the business rules behind the Tuttle freelancer
//! management application: lifecycle status classification for contracts
//! and projects, progressive income tax calculation, and invoice totals,
//! together with the configuration and HTTP surface used to reach them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
