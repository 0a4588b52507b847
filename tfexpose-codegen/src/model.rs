//! Records flowing between pipeline phases.

use std::{fmt, path::PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::reference::ResourceReference;

/// A file and 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// An output block preceded by a marker comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedDeclaration {
    /// Path relative to the scanned root.
    pub file: PathBuf,
    /// Line of the declaration keyword.
    pub line: usize,
    pub name: String,
    pub reference_expression: String,
}

impl AnnotatedDeclaration {
    pub fn location(&self) -> Location {
        Location::new(&self.file, self.line)
    }
}

/// A declaration whose reference expression parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDeclaration {
    pub declaration: AnnotatedDeclaration,
    pub reference: ResourceReference,
}

impl ResolvedDeclaration {
    /// Value of the generated output: the same attribute path, read through the data source.
    pub fn data_reference(&self) -> String {
        self.reference.data_expression()
    }
}

/// A resource with a data source counterpart and the values needed to look it up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedResource {
    pub resource_type: String,
    pub resource_name: String,
    /// Provider whose data source schema matched.
    pub provider: String,
    /// Required data source attributes, sorted.
    pub required_attributes: Vec<String>,
    /// Values found in state; required attributes absent here render empty.
    pub extracted_values: IndexMap<String, Value>,
}

impl MatchedResource {
    pub fn new(
        reference: &ResourceReference,
        provider: impl Into<String>,
        required_attributes: Vec<String>,
    ) -> Self {
        Self {
            resource_type: reference.resource_type.clone(),
            resource_name: reference.resource_name.clone(),
            provider: provider.into(),
            required_attributes,
            extracted_values: IndexMap::new(),
        }
    }

    /// `type.name`
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_name)
    }

    /// Required attributes paired with their extracted value, if any.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.required_attributes
            .iter()
            .map(|name| (name.as_str(), self.extracted_values.get(name)))
    }
}
