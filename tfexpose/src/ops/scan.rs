//! Scan operation - lists annotated outputs without touching the tool.

use std::path::Path;

use eyre::{Context, Result};
use tfexpose_codegen::pipeline::{Pipeline, ProjectInput};

use crate::reports::{ScanEntry, ScanReport};

/// Run the scan and resolve phases over `root`.
pub fn scan(root: &Path, marker: &str) -> Result<ScanReport> {
    let ctx = Pipeline::scan_only()
        .run(ProjectInput::new(root, marker))
        .wrap_err("Scan failed")?;

    let entries = ctx
        .declarations
        .iter()
        .map(|declaration| {
            let address = ctx
                .resolved
                .iter()
                .find(|r| r.declaration == *declaration)
                .map(|r| r.reference.address());
            ScanEntry {
                name: declaration.name.clone(),
                location: declaration.location().to_string(),
                expression: declaration.reference_expression.clone(),
                address,
            }
        })
        .collect();

    let warnings = ctx.warnings().map(|d| d.message.clone()).collect();

    Ok(ScanReport {
        root: root.to_path_buf(),
        marker: marker.to_string(),
        entries,
        warnings,
    })
}
