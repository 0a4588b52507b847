//! Public interface generation for Terraform projects.
//!
//! This crate finds outputs annotated with a marker comment, resolves the
//! resources they reference, matches each resource type against the data
//! sources of the installed providers, and renders the read-only module
//! that re-exposes the same values.
//!
//! # Module Organization
//!
//! - [`scan`] - Annotation scanner over `.tf` / `.tf.json` trees
//! - [`reference`] - `type.name.attr` reference grammar
//! - [`matcher`] - Data source lookup in the provider schema snapshot
//! - [`extract`] - Attribute lookup in the state snapshot
//! - [`pipeline`] - Phase pipeline, diagnostics and plugin hooks
//! - [`files`] - The three generated `.tf` files
//! - [`builder`] - HCL building blocks

pub mod builder;
mod error;
pub mod extract;
pub mod files;
mod generator;
pub mod matcher;
mod model;
pub mod pipeline;
pub mod reference;
pub mod scan;

pub use error::{Error, Result};
pub use generator::{GenerateResult, Generator, PreviewFile};
pub use model::{AnnotatedDeclaration, Location, MatchedResource, ResolvedDeclaration};
