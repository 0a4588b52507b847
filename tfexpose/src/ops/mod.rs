//! Core operations.
//!
//! This module contains the business logic for tfexpose commands,
//! separated from CLI argument parsing and output rendering.

pub mod generate;
pub mod scan;

pub use generate::{GenerateOptions, ProjectPlan, generate};
pub use scan::scan;
