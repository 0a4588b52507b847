//! Extract phase - reads required attribute values from state.

use crate::{
    Result,
    extract::StateExtractor,
    pipeline::{CompilationContext, Diagnostic, DiagnosticKind, Phase},
};

/// Phase that fills each matched resource's required attributes from state.
///
/// Attributes without a recorded value stay absent and render as `""`.
pub struct ExtractPhase;

impl Phase for ExtractPhase {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn description(&self) -> &'static str {
        "Read required attribute values from state"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let extractor = StateExtractor::new(&ctx.input.state);

        for (address, resource) in ctx.resources.iter_mut() {
            let recorded = extractor.resource(address).is_some();

            for attribute in &resource.required_attributes {
                match extractor.extract(address, attribute) {
                    Some(value) => {
                        resource
                            .extracted_values
                            .insert(attribute.clone(), value.clone());
                    }
                    None => {
                        let message = if recorded {
                            format!(
                                "attribute {attribute} of {address} is not recorded in state; using an empty value"
                            )
                        } else {
                            format!(
                                "{address} is not recorded in state; attribute {attribute} uses an empty value"
                            )
                        };
                        ctx.diagnostics.push(Diagnostic::info(
                            self.name(),
                            DiagnosticKind::AttributeAbsentFromState,
                            message,
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tfexpose_snapshot::{StateResource, StateSnapshot};

    use super::*;
    use crate::{MatchedResource, pipeline::ProjectInput, reference::ResourceReference};

    fn context(state: StateSnapshot, references: &[(&str, &[&str])]) -> CompilationContext {
        let mut ctx = CompilationContext::new(ProjectInput::new(".", "@public").with_state(state));
        for (expression, required) in references {
            let reference = ResourceReference::parse(expression).unwrap();
            ctx.resources.insert(
                reference.address(),
                MatchedResource::new(
                    &reference,
                    "hashicorp/aws",
                    required.iter().map(|s| s.to_string()).collect(),
                ),
            );
        }
        ctx
    }

    #[test]
    fn test_values_are_extracted() {
        let state = StateSnapshot::from_resources([StateResource::new("aws_instance.foo")
            .with_value("id", "i-123")
            .with_value("count", 3)]);
        let mut ctx = context(state, &[("aws_instance.foo.id", &["count", "id"][..])]);

        ExtractPhase.run(&mut ctx).unwrap();

        let resource = &ctx.resources["aws_instance.foo"];
        assert_eq!(resource.extracted_values["id"], json!("i-123"));
        assert_eq!(resource.extracted_values["count"], json!(3));
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_absent_values_are_reported_as_info() {
        let state = StateSnapshot::from_resources([
            StateResource::new("aws_instance.foo").with_value("id", "i-123")
        ]);
        let mut ctx = context(
            state,
            &[
                ("aws_instance.foo.id", &["id", "region"][..]),
                ("aws_instance.gone.id", &["id"][..]),
            ],
        );

        ExtractPhase.run(&mut ctx).unwrap();

        assert!(!ctx.resources["aws_instance.foo"].extracted_values.contains_key("region"));
        assert!(ctx.resources["aws_instance.gone"].extracted_values.is_empty());
        let messages: Vec<_> = ctx
            .diagnostics_of(DiagnosticKind::AttributeAbsentFromState)
            .map(|d| (d.severity, d.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            vec![
                (
                    crate::pipeline::Severity::Info,
                    "attribute region of aws_instance.foo is not recorded in state; using an empty value"
                ),
                (
                    crate::pipeline::Severity::Info,
                    "aws_instance.gone is not recorded in state; attribute id uses an empty value"
                ),
            ]
        );
    }
}
