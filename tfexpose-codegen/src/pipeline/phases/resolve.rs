//! Resolve phase - parses reference expressions.

use crate::{
    ResolvedDeclaration, Result,
    pipeline::{CompilationContext, Diagnostic, DiagnosticKind, Phase},
    reference::ResourceReference,
};

/// Phase that splits each declaration's value into a resource reference.
///
/// Declarations with a malformed reference are dropped with a warning.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Parse reference expressions into resource addresses"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut resolved = Vec::with_capacity(ctx.declarations.len());

        for declaration in &ctx.declarations {
            match ResourceReference::parse(&declaration.reference_expression) {
                Ok(reference) => resolved.push(ResolvedDeclaration {
                    declaration: declaration.clone(),
                    reference,
                }),
                Err(err) => {
                    let message = format!(
                        "Annotated output {} at line {} in {} has a malformed reference: {}",
                        declaration.name,
                        declaration.line,
                        declaration.file.display(),
                        err
                    );
                    ctx.diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            DiagnosticKind::MalformedReference,
                            message,
                        )
                        .at(declaration.location()),
                    );
                }
            }
        }

        ctx.resolved = resolved;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotatedDeclaration, pipeline::ProjectInput};

    fn declaration(name: &str, expression: &str, line: usize) -> AnnotatedDeclaration {
        AnnotatedDeclaration {
            file: "outputs.tf".into(),
            line,
            name: name.to_string(),
            reference_expression: expression.to_string(),
        }
    }

    #[test]
    fn test_malformed_reference_is_dropped_with_warning() {
        let mut ctx = CompilationContext::new(ProjectInput::new(".", "@public"));
        ctx.declarations = vec![
            declaration("output1", "value1", 2),
            declaration("web_id", "aws_instance.web.id", 6),
        ];

        ResolvePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.resolved.len(), 1);
        assert_eq!(ctx.resolved[0].reference.address(), "aws_instance.web");

        let warning = &ctx.diagnostics[0];
        assert_eq!(warning.kind, DiagnosticKind::MalformedReference);
        assert_eq!(warning.location.as_ref().map(|l| l.line), Some(2));
        assert_eq!(
            warning.message,
            "Annotated output output1 at line 2 in outputs.tf has a malformed reference: \
             'value1' has fewer than two dotted components"
        );
    }
}
