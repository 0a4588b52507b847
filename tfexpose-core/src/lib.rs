//! Core utilities and types for the tfexpose interface generator.
//!
//! This crate provides the generated-file abstraction and the HCL string
//! helpers shared by the code generator and the command-line driver.

mod file;
mod utils;

// File operations
pub use file::{File, GeneratedFile};
// String utilities
pub use utils::{hcl_escape, hcl_quote, json_value_to_hcl, provider_short_name};
