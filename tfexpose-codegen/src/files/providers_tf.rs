use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tfexpose_core::{GeneratedFile, provider_short_name};
use tfexpose_snapshot::ProviderSchemaSnapshot;

use crate::{
    MatchedResource,
    builder::{CodeBuilder, Expression, HclBlock},
    matcher::SchemaMatcher,
};

pub const PROVIDERS_FILE: &str = "generated_providers.tf";

/// One `required_providers` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequirement {
    pub name: String,
    pub source: String,
}

/// The `terraform { required_providers { ... } }` block.
pub struct ProvidersTf {
    providers: Vec<ProviderRequirement>,
}

impl ProvidersTf {
    pub fn new(providers: Vec<ProviderRequirement>) -> Self {
        Self { providers }
    }

    /// Providers owning a resource schema for any matched resource type.
    ///
    /// Entries keep the first-seen order of the resources and are
    /// deduplicated by short name; the first source seen for a name wins.
    pub fn from_resources<'a>(
        resources: impl IntoIterator<Item = &'a MatchedResource>,
        schema: &ProviderSchemaSnapshot,
    ) -> Self {
        let matcher = SchemaMatcher::new(schema);
        let mut providers: IndexMap<&str, &str> = IndexMap::new();

        for resource in resources {
            for source in matcher.resource_providers(&resource.resource_type) {
                providers
                    .entry(provider_short_name(source))
                    .or_insert(source);
            }
        }

        Self::new(
            providers
                .into_iter()
                .map(|(name, source)| ProviderRequirement {
                    name: name.to_string(),
                    source: source.to_string(),
                })
                .collect(),
        )
    }

    pub fn providers(&self) -> &[ProviderRequirement] {
        &self.providers
    }
}

impl GeneratedFile for ProvidersTf {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(PROVIDERS_FILE)
    }

    fn render(&self) -> String {
        let required = self.providers.iter().fold(
            HclBlock::new("required_providers"),
            |block, provider| {
                block.attribute(
                    &provider.name,
                    Expression::Object(vec![(
                        "source".to_string(),
                        Expression::string(&provider.source),
                    )]),
                )
            },
        );

        CodeBuilder::hcl()
            .render(&HclBlock::new("terraform").block(required))
            .build()
    }
}
