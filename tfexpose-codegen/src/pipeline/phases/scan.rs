//! Scan phase - finds annotated outputs.

use crate::{
    Result,
    pipeline::{CompilationContext, Diagnostic, DiagnosticKind, Phase},
    scan::Scanner,
};

/// Phase that walks the project and collects annotated declarations.
pub struct ScanPhase;

impl Phase for ScanPhase {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn description(&self) -> &'static str {
        "Find outputs annotated with the marker comment"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let scanner = Scanner::new(ctx.input.marker.as_str());
        ctx.declarations = scanner.scan_dir(&ctx.input.root)?;

        tracing::debug!(
            root = %ctx.input.root.display(),
            count = ctx.declarations.len(),
            "scan complete"
        );

        if ctx.declarations.is_empty() {
            let message = format!(
                "no outputs annotated with '{}' found in {}",
                ctx.input.marker,
                ctx.input.root.display()
            );
            ctx.add_diagnostic(Diagnostic::info(
                self.name(),
                DiagnosticKind::NoDeclarations,
                message,
            ));
        }

        Ok(())
    }
}
