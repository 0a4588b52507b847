//! Snapshot types for the tfexpose interface generator.
//!
//! These types mirror the JSON documents produced by
//! `terraform providers schema -json` and `terraform show -json` (and their
//! OpenTofu equivalents). Only the parts the generator reads are modelled;
//! unknown fields are ignored.
//!
//! # Architecture
//!
//! ```text
//! terraform CLI (JSON) → tfexpose-snapshot (parsing) → tfexpose-codegen
//! ```
//!
//! Mappings use [`BTreeMap`](std::collections::BTreeMap) so that iteration
//! over providers and attributes is lexically ordered and reproducible.

mod error;
mod schema;
mod state;

pub use error::{SnapshotError, SnapshotKind};
pub use schema::{
    Attribute, AttributeSet, ProviderSchema, ProviderSchemaSnapshot, SchemaBlock, SchemaEntry,
};
pub use state::{RootModule, StateResource, StateSnapshot, StateValues};
