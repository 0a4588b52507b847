//! Diagnostic types for the generation pipeline.
//!
//! Problems with individual declarations never abort a run; phases record
//! them here and the caller decides how to present them.

use std::fmt;

use serde::Serialize;

use crate::Location;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// A declaration was left out of the generated module.
    Warning,
    /// Informational message about the run.
    Info,
}

impl Severity {
    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    pub fn is_info(&self) -> bool {
        matches!(self, Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// The value of an annotated output is not a `type.name.attr` reference.
    MalformedReference,
    /// No provider defines a data source for the referenced resource type.
    NoMatchingDataSource,
    /// A required data source attribute has no value in state.
    AttributeAbsentFromState,
    /// Two exposed outputs share a name.
    DuplicateOutputName,
    /// The project has no annotated outputs.
    NoDeclarations,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedReference => "malformed-reference",
            DiagnosticKind::NoMatchingDataSource => "no-matching-data-source",
            DiagnosticKind::AttributeAbsentFromState => "attribute-absent-from-state",
            DiagnosticKind::DuplicateOutputName => "duplicate-output-name",
            DiagnosticKind::NoDeclarations => "no-declarations",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message from a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Where the offending declaration starts.
    pub location: Option<Location>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        phase: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            phase: phase.into(),
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        phase: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, phase, kind, message)
    }

    /// Create a new info diagnostic.
    pub fn info(phase: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, kind, message)
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {})", location)?;
        }
        Ok(())
    }
}
