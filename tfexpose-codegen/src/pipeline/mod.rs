//! Generation pipeline.
//!
//! A [`Pipeline`] runs its phases over a shared [`CompilationContext`]:
//!
//! - Explicit phase boundaries (scan → resolve → match → extract)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//!
//! The finished context is handed to [`Generator`](crate::Generator).

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{CompilationContext, ProjectInput};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
