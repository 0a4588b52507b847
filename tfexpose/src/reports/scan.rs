//! Scan command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Annotated outputs found in one project.
#[derive(Debug)]
pub struct ScanReport {
    pub root: PathBuf,
    pub marker: String,
    pub entries: Vec<ScanEntry>,
    /// Malformed reference warnings.
    pub warnings: Vec<String>,
}

/// One annotated output.
#[derive(Debug)]
pub struct ScanEntry {
    pub name: String,
    /// `file:line` of the output block.
    pub location: String,
    pub expression: String,
    /// Resource address, when the reference is well formed.
    pub address: Option<String>,
}

impl Report for ScanReport {
    fn render(&self, out: &mut dyn Output) {
        out.divider(&self.root.display().to_string());

        for warning in &self.warnings {
            out.warning(warning);
        }

        if self.entries.is_empty() {
            out.preformatted(&format!("No outputs annotated with {}", self.marker));
            return;
        }

        out.section(&format!("Annotated outputs ({})", self.entries.len()));
        for entry in &self.entries {
            let target = match &entry.address {
                Some(address) => format!("{} -> {}", entry.expression, address),
                None => format!("{} (malformed)", entry.expression),
            };
            out.list_item(&format!("{} = {}  [{}]", entry.name, target, entry.location));
        }
    }
}
