//! Data source lookup in the provider schema snapshot.

use tfexpose_snapshot::ProviderSchemaSnapshot;

/// A data source found for a resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceMatch<'a> {
    /// Source of the provider defining the data source.
    pub provider: &'a str,
    /// Required attribute names, sorted.
    pub required_attributes: Vec<String>,
}

/// Matches resource types against provider schemas.
///
/// Providers are searched in lexical order of their source, so when more
/// than one defines the same data source type the first in that order wins.
#[derive(Debug, Clone, Copy)]
pub struct SchemaMatcher<'a> {
    schema: &'a ProviderSchemaSnapshot,
}

impl<'a> SchemaMatcher<'a> {
    pub fn new(schema: &'a ProviderSchemaSnapshot) -> Self {
        Self { schema }
    }

    /// The data source with the same type name as `resource_type`.
    pub fn find_data_source(&self, resource_type: &str) -> Option<DataSourceMatch<'a>> {
        self.schema.providers().find_map(|(source, provider)| {
            provider
                .data_source(resource_type)
                .map(|entry| DataSourceMatch {
                    provider: source,
                    required_attributes: entry
                        .required_attributes()
                        .map(str::to_string)
                        .collect(),
                })
        })
    }

    /// Providers managing resources of `resource_type`, in lexical order.
    pub fn resource_providers(&self, resource_type: &str) -> impl Iterator<Item = &'a str> {
        self.schema
            .providers()
            .filter(move |(_, provider)| provider.has_resource(resource_type))
            .map(|(source, _)| source)
    }
}
