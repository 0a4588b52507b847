// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for the tfexpose interface generator.
//!
//! The configuration lives in `tfexpose.toml` and selects the external tool,
//! the comment marker, the output directory and the projects to process.

mod config;
mod error;
mod parse;
mod tool;
mod validate;

pub use config::{Config, DEFAULT_MARKER, DEFAULT_OUTPUT_DIR, ProjectConfig, Settings};
pub use error::{Error, Result, SourceContext};
pub use tool::Tool;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tfexpose.toml";
