//! Provider schema snapshot (`providers schema -json`).

use std::{collections::BTreeMap, str::FromStr};

use serde::Deserialize;

use crate::{SnapshotError, SnapshotKind};

/// Attribute name → attribute schema, lexically ordered.
pub type AttributeSet = BTreeMap<String, Attribute>;

/// Root of the provider schema document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSchemaSnapshot {
    #[serde(default)]
    pub format_version: Option<String>,

    /// Provider source (e.g. "registry.terraform.io/hashicorp/aws") → schemas.
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, ProviderSchema>,
}

impl ProviderSchemaSnapshot {
    /// Parse the JSON emitted by `providers schema -json`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json)
            .map_err(|e| SnapshotError::parse(SnapshotKind::ProviderSchemas, e))
    }

    /// Providers in lexical order of their source identifier.
    pub fn providers(&self) -> impl Iterator<Item = (&str, &ProviderSchema)> {
        self.provider_schemas
            .iter()
            .map(|(source, schema)| (source.as_str(), schema))
    }

    /// Add a provider, replacing any previous entry with the same source.
    pub fn with_provider(mut self, source: impl Into<String>, schema: ProviderSchema) -> Self {
        self.provider_schemas.insert(source.into(), schema);
        self
    }
}

impl FromStr for ProviderSchemaSnapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

/// Resource and data source schemas owned by one provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSchema {
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, SchemaEntry>,

    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, SchemaEntry>,
}

impl ProviderSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, ty: impl Into<String>, entry: SchemaEntry) -> Self {
        self.resource_schemas.insert(ty.into(), entry);
        self
    }

    pub fn with_data_source(mut self, ty: impl Into<String>, entry: SchemaEntry) -> Self {
        self.data_source_schemas.insert(ty.into(), entry);
        self
    }

    /// Whether this provider manages resources of the given type.
    pub fn has_resource(&self, ty: &str) -> bool {
        self.resource_schemas.contains_key(ty)
    }

    /// The data source schema for the given type, if this provider has one.
    pub fn data_source(&self, ty: &str) -> Option<&SchemaEntry> {
        self.data_source_schemas.get(ty)
    }
}

/// Schema of a single resource or data source type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaEntry {
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub block: SchemaBlock,
}

impl SchemaEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.block.attributes.insert(name.into(), attribute);
        self
    }

    /// All attributes of the top-level block.
    pub fn attributes(&self) -> &AttributeSet {
        &self.block.attributes
    }

    /// Names of required attributes, in lexical order.
    pub fn required_attributes(&self) -> impl Iterator<Item = &str> {
        self.block
            .attributes
            .iter()
            .filter(|(_, attr)| attr.required)
            .map(|(name, _)| name.as_str())
    }
}

/// Top-level block of a schema entry. Nested blocks are not modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaBlock {
    #[serde(default)]
    pub attributes: AttributeSet,

    #[serde(default)]
    pub description: Option<String>,
}

/// Schema of one attribute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    /// Semantic type; either a primitive name ("string") or a composite
    /// such as `["list", "string"]`.
    #[serde(rename = "type", default)]
    pub ty: Option<serde_json::Value>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub computed: bool,

    #[serde(default)]
    pub sensitive: bool,
}

impl Attribute {
    /// A required string attribute.
    pub fn required() -> Self {
        Self {
            ty: Some(serde_json::Value::String("string".to_string())),
            required: true,
            ..Self::default()
        }
    }

    /// An optional, computed string attribute.
    pub fn computed() -> Self {
        Self {
            ty: Some(serde_json::Value::String("string".to_string())),
            optional: true,
            computed: true,
            ..Self::default()
        }
    }
}
