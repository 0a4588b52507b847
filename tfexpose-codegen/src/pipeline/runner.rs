//! Pipeline orchestrator.

use super::{
    CompilationContext, Phase, Plugin, ProjectInput,
    phases::{ExtractPhase, MatchPhase, ResolvePhase, ScanPhase},
};
use crate::Result;

/// The generation pipeline orchestrator.
///
/// Runs its phases in order, calling plugin hooks before and after each.
///
/// # Example
///
/// ```no_run
/// use tfexpose_codegen::{Generator, pipeline::{Pipeline, ProjectInput}};
///
/// let input = ProjectInput::new("infra/network", "@public");
/// let ctx = Pipeline::new().run(input)?;
/// for warning in ctx.warnings() {
///     eprintln!("{warning}");
/// }
/// Generator::from_context(&ctx).generate("infra/network/interface".as_ref())?;
/// # Ok::<(), tfexpose_codegen::Error>(())
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with all built-in phases: scan, resolve, match, extract.
    pub fn new() -> Self {
        Self {
            phases: vec![
                Box::new(ScanPhase),
                Box::new(ResolvePhase),
                Box::new(MatchPhase),
                Box::new(ExtractPhase),
            ],
            plugins: Vec::new(),
        }
    }

    /// Create a pipeline that only scans and resolves; no snapshots are read.
    pub fn scan_only() -> Self {
        Self {
            phases: vec![Box::new(ScanPhase), Box::new(ResolvePhase)],
            plugins: Vec::new(),
        }
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on one project.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails fatally.
    pub fn run(&self, input: ProjectInput) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(input);

        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            tracing::trace!(plugin = plugin.name(), phase = phase_name, "before phase");
            plugin.on_before_phase(phase_name, ctx)?;
        }

        tracing::debug!(
            phase = phase_name,
            description = phase.description(),
            "running phase"
        );
        phase.run(ctx)?;

        for plugin in &self.plugins {
            tracing::trace!(plugin = plugin.name(), phase = phase_name, "after phase");
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
