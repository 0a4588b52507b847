//! HCL building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented text
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`HclBlock`] - A `type "label" { ... }` block
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod hcl;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use hcl::{Expression, HclBlock};
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
