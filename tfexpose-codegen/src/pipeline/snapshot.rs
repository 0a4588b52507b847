//! Pipeline snapshot plugin for visualization and debugging.
//!
//! Captures the context after each phase so the intermediate results can
//! be inspected as JSON (`generate --visualize`).

use std::{
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use indexmap::IndexMap;
use serde::Serialize;
use tfexpose_core::File;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::{AnnotatedDeclaration, Error, MatchedResource, ResolvedDeclaration, Result};

/// The pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,
    pub declarations: Vec<AnnotatedDeclaration>,
    pub resolved: Vec<ResolvedDeclaration>,
    pub exposed: Vec<ResolvedDeclaration>,
    pub resources: IndexMap<String, MatchedResource>,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &CompilationContext) -> Self {
        Self {
            phase: phase.to_string(),
            declarations: ctx.declarations.clone(),
            resolved: ctx.resolved.clone(),
            exposed: ctx.exposed.clone(),
            resources: ctx.resources.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }

    fn file(&self, dir: &Path) -> Result<File> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(File::new(dir.join(format!("{}.json", self.phase)), json))
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".tfexpose/debug"));
/// let ctx = pipeline.run(input)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Written after each phase when set.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir`, one `<phase>.json` each.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.snapshots() {
            write_snapshot(&snapshot, dir.as_ref())?;
        }
        Ok(())
    }
}

fn write_snapshot(snapshot: &PhaseSnapshot, dir: &Path) -> Result<()> {
    let file = snapshot.file(dir)?;
    file.write().map_err(|source| Error::Write {
        path: file.path().to_path_buf(),
        source,
    })?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = PhaseSnapshot::capture(phase, ctx);

        if let Some(dir) = &self.output_dir {
            write_snapshot(&snapshot, dir)?;
        }

        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
        Ok(())
    }
}
