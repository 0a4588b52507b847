//! Compilation context passed through pipeline phases.

use std::path::PathBuf;

use indexmap::IndexMap;
use tfexpose_snapshot::{ProviderSchemaSnapshot, StateSnapshot};

use super::diagnostic::{Diagnostic, DiagnosticKind};
use crate::{AnnotatedDeclaration, MatchedResource, ResolvedDeclaration};

/// What one pipeline run works on.
#[derive(Debug, Clone)]
pub struct ProjectInput {
    /// Root of the declaration tree.
    pub root: PathBuf,
    /// Comment marker that tags an output as exposable.
    pub marker: String,
    pub schema: ProviderSchemaSnapshot,
    pub state: StateSnapshot,
}

impl ProjectInput {
    pub fn new(root: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            marker: marker.into(),
            schema: ProviderSchemaSnapshot::default(),
            state: StateSnapshot::default(),
        }
    }

    pub fn with_schema(mut self, schema: ProviderSchemaSnapshot) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_state(mut self, state: StateSnapshot) -> Self {
        self.state = state;
        self
    }
}

/// Context passed through all pipeline phases.
///
/// Each phase reads what earlier phases produced and fills in its own
/// part; diagnostics accumulate along the way.
#[derive(Debug)]
pub struct CompilationContext {
    pub input: ProjectInput,
    /// Annotated outputs in scan order (populated by ScanPhase).
    pub declarations: Vec<AnnotatedDeclaration>,
    /// Declarations with a well-formed reference (populated by ResolvePhase).
    pub resolved: Vec<ResolvedDeclaration>,
    /// Declarations that get an output block (populated by MatchPhase).
    pub exposed: Vec<ResolvedDeclaration>,
    /// Matched resources by address, first occurrence first (populated by
    /// MatchPhase, values filled by ExtractPhase).
    pub resources: IndexMap<String, MatchedResource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(input: ProjectInput) -> Self {
        Self {
            input,
            declarations: Vec::new(),
            resolved: Vec::new(),
            exposed: Vec::new(),
            resources: IndexMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Matched resources in first-seen order.
    pub fn matched_resources(&self) -> impl Iterator<Item = &MatchedResource> {
        self.resources.values()
    }
}
