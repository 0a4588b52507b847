//! Pipeline phase trait.

use super::CompilationContext;
use crate::Result;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the compilation context.
///
/// Built-in phases:
/// - `ScanPhase` - finds annotated outputs
/// - `ResolvePhase` - parses their reference expressions
/// - `MatchPhase` - looks up data sources and deduplicates resources
/// - `ExtractPhase` - reads required attribute values from state
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
