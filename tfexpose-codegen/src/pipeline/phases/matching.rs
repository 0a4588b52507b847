//! Match phase - finds data source counterparts.

use std::collections::HashSet;

use crate::{
    MatchedResource, Result,
    matcher::SchemaMatcher,
    pipeline::{CompilationContext, Diagnostic, DiagnosticKind, Phase},
};

/// Phase that keeps declarations whose resource type has a data source.
///
/// Every declaration is checked on its own, so each unmatched occurrence
/// gets its own warning. Resources are deduplicated by address, first
/// occurrence wins; a later declaration reusing an exposed output name is
/// dropped.
pub struct MatchPhase;

impl Phase for MatchPhase {
    fn name(&self) -> &'static str {
        "match"
    }

    fn description(&self) -> &'static str {
        "Match resource types against provider data sources"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let matcher = SchemaMatcher::new(&ctx.input.schema);
        let mut output_names = HashSet::new();

        for resolved in &ctx.resolved {
            let declaration = &resolved.declaration;
            let reference = &resolved.reference;

            let Some(found) = matcher.find_data_source(&reference.resource_type) else {
                let message = format!(
                    "Annotated resource {} at line {} in {} does not have a matching data resource!",
                    reference.address(),
                    declaration.line,
                    declaration.file.display()
                );
                ctx.diagnostics.push(
                    Diagnostic::warning(self.name(), DiagnosticKind::NoMatchingDataSource, message)
                        .at(declaration.location()),
                );
                continue;
            };

            if !output_names.insert(declaration.name.as_str()) {
                let message = format!(
                    "Annotated output {} at line {} in {} reuses an exposed output name and is skipped",
                    declaration.name,
                    declaration.line,
                    declaration.file.display()
                );
                ctx.diagnostics.push(
                    Diagnostic::warning(self.name(), DiagnosticKind::DuplicateOutputName, message)
                        .at(declaration.location()),
                );
                continue;
            }

            tracing::debug!(
                address = %reference.address(),
                provider = found.provider,
                "matched data source"
            );
            ctx.resources
                .entry(reference.address())
                .or_insert_with(|| {
                    MatchedResource::new(reference, found.provider, found.required_attributes)
                });
            ctx.exposed.push(resolved.clone());
        }

        Ok(())
    }
}
