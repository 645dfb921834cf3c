//! Core domain types and logic.

pub mod aggregate;
pub mod analysis;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod interpret;
pub mod series;
pub mod signal;
pub mod trend;
