//! Turns a finished pipeline context into the generated files.

use std::path::{Path, PathBuf};

use tfexpose_core::GeneratedFile;
use tfexpose_snapshot::ProviderSchemaSnapshot;

use crate::{
    Error, MatchedResource, ResolvedDeclaration, Result,
    files::{DataTf, OutputsTf, ProvidersTf},
    pipeline::CompilationContext,
};

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written, in data, outputs, providers order
    pub written: Vec<PathBuf>,
}

impl GenerateResult {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Renders `generated_data.tf`, `generated_outputs.tf` and `generated_providers.tf`.
pub struct Generator {
    data: DataTf,
    outputs: OutputsTf,
    providers: ProvidersTf,
    exposed: usize,
}

impl Generator {
    pub fn new(
        resources: Vec<MatchedResource>,
        outputs: Vec<ResolvedDeclaration>,
        schema: &ProviderSchemaSnapshot,
    ) -> Self {
        let providers = ProvidersTf::from_resources(&resources, schema);
        Self {
            exposed: outputs.len(),
            data: DataTf::new(resources),
            outputs: OutputsTf::new(outputs),
            providers,
        }
    }

    /// Build from a context that went through the match and extract phases.
    pub fn from_context(ctx: &CompilationContext) -> Self {
        Self::new(
            ctx.matched_resources().cloned().collect(),
            ctx.exposed.clone(),
            &ctx.input.schema,
        )
    }

    /// Whether no declaration survived matching; nothing is generated then.
    pub fn is_empty(&self) -> bool {
        self.exposed == 0
    }

    fn files(&self) -> [&dyn GeneratedFile; 3] {
        [&self.data, &self.outputs, &self.providers]
    }

    /// Preview generated files without writing to disk
    pub fn preview(&self) -> Vec<PreviewFile> {
        if self.is_empty() {
            return Vec::new();
        }
        self.files()
            .into_iter()
            .map(|file| PreviewFile {
                path: file.path(Path::new("")).display().to_string(),
                content: file.render(),
            })
            .collect()
    }

    /// Write all files into `output_dir`, creating it if needed.
    ///
    /// Each file replaces any previous version atomically.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        if self.is_empty() {
            tracing::info!(dir = %output_dir.display(), "nothing to generate");
            return Ok(result);
        }

        for file in self.files() {
            let path = file.path(output_dir);
            file.write(output_dir).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            result.written.push(path);
        }

        tracing::info!(
            dir = %output_dir.display(),
            files = result.written.len(),
            "generated interface"
        );
        Ok(result)
    }
}
