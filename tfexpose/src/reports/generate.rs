//! Generate command report data structures.

use std::path::PathBuf;

use tfexpose_codegen::{PreviewFile, pipeline::Diagnostic};

use super::output::{Output, Report};

/// Report data from one `generate` run over all selected projects.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Projects in processing order.
    pub projects: Vec<ProjectReport>,
    /// Projects left unprocessed after a failure with `--fail-fast`.
    pub skipped_after_failure: usize,
}

/// What happened to one project.
#[derive(Debug)]
pub struct ProjectReport {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    /// Declarations left out of the generated module.
    pub diagnostics: Vec<Diagnostic>,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
    pub outcome: ProjectOutcome,
}

/// Result of processing a project.
#[derive(Debug)]
pub enum ProjectOutcome {
    /// Files were written to disk.
    Written(Vec<PathBuf>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
    /// No annotated output matched a data source.
    NothingToGenerate,
    /// The state records no resources.
    NotApplied,
    /// A fatal error stopped the project.
    Failed(String),
}

impl ProjectReport {
    pub fn new(
        root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        outcome: ProjectOutcome,
    ) -> Self {
        Self {
            root: root.into(),
            output_dir: output_dir.into(),
            diagnostics: Vec::new(),
            debug_dir: None,
            outcome,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ProjectOutcome::Failed(_))
    }

    fn render(&self, out: &mut dyn Output) {
        out.divider(&self.root.display().to_string());

        if let Some(debug_dir) = &self.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
        }

        for diag in &self.diagnostics {
            out.warning(&diag.message);
        }

        match &self.outcome {
            ProjectOutcome::Written(paths) => {
                out.section("Generated");
                for path in paths {
                    out.added_item(&path.display().to_string());
                }
            }
            ProjectOutcome::Preview(files) => {
                for file in files {
                    out.divider(&self.output_dir.join(&file.path).display().to_string());
                    out.preformatted(file.content.trim_end());
                }
            }
            ProjectOutcome::NothingToGenerate => {
                out.preformatted("No annotated output matched a data source; nothing generated")
            }
            ProjectOutcome::NotApplied => out.preformatted("Project has not been applied; skipped"),
            ProjectOutcome::Failed(message) => out.error(message),
        }
        out.newline();
    }
}

impl GenerateReport {
    /// Whether any project failed.
    pub fn has_failures(&self) -> bool {
        self.projects.iter().any(ProjectReport::is_failed)
    }

    fn count(&self, pred: impl Fn(&ProjectOutcome) -> bool) -> usize {
        self.projects.iter().filter(|p| pred(&p.outcome)).count()
    }

    fn summary(&self) -> String {
        let generated = self.count(|o| {
            matches!(o, ProjectOutcome::Written(_) | ProjectOutcome::Preview(_))
        });
        let empty = self.count(|o| matches!(o, ProjectOutcome::NothingToGenerate));
        let not_applied = self.count(|o| matches!(o, ProjectOutcome::NotApplied));
        let failed = self.count(|o| matches!(o, ProjectOutcome::Failed(_)));

        let mut summary = format!(
            "{} project(s): {} generated, {} with nothing to generate, {} not applied, {} failed",
            self.projects.len(),
            generated,
            empty,
            not_applied,
            failed
        );
        if self.skipped_after_failure > 0 {
            summary.push_str(&format!(
                ", {} not processed (--fail-fast)",
                self.skipped_after_failure
            ));
        }
        summary
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for project in &self.projects {
            project.render(out);
        }

        out.divider("Summary");
        out.preformatted(&self.summary());
    }
}
