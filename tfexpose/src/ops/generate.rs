//! Generate operation - the full pipeline over every selected project.

use std::path::PathBuf;

use tfexpose_codegen::{
    Generator,
    pipeline::{Pipeline, ProjectInput, SnapshotPlugin},
};

use crate::{
    reports::{GenerateReport, ProjectOutcome, ProjectReport},
    terraform::Snapshots,
};

/// Where per-phase snapshots go, relative to the project.
pub const DEBUG_DIR: &str = ".tfexpose/debug";

/// One project to process, with every override already applied.
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub root: PathBuf,
    pub marker: String,
    /// Receives the generated files.
    pub output_dir: PathBuf,
}

/// Options for the generate operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Stop after the first failed project.
    pub fail_fast: bool,
    /// Whether to output debug snapshots.
    pub visualize: bool,
}

/// Execute the generate operation.
///
/// Projects run in order. A failure is recorded in the report and the
/// next project still runs unless `fail_fast` is set.
pub fn generate(
    plans: &[ProjectPlan],
    snapshots: &Snapshots,
    opts: GenerateOptions,
) -> GenerateReport {
    let mut report = GenerateReport::default();

    for (index, plan) in plans.iter().enumerate() {
        let _span = tracing::info_span!("project", root = %plan.root.display()).entered();
        tracing::info!("processing project");

        let project = generate_project(plan, snapshots, opts).unwrap_or_else(|err| {
            let message = format!("{:#}", eyre::Report::new(err));
            tracing::error!("{message}");
            ProjectReport::new(&plan.root, &plan.output_dir, ProjectOutcome::Failed(message))
        });

        let failed = project.is_failed();
        report.projects.push(project);
        if failed && opts.fail_fast {
            report.skipped_after_failure = plans.len() - index - 1;
            break;
        }
    }

    report
}

fn generate_project(
    plan: &ProjectPlan,
    snapshots: &Snapshots,
    opts: GenerateOptions,
) -> tfexpose_codegen::Result<ProjectReport> {
    let state = snapshots.state(&plan.root)?;
    if !state.is_applied() {
        tracing::info!("project has not been applied, skipping");
        return Ok(ProjectReport::new(
            &plan.root,
            &plan.output_dir,
            ProjectOutcome::NotApplied,
        ));
    }
    let schema = snapshots.schema(&plan.root)?;

    // Set up the pipeline with optional visualization
    let debug_dir = plan.root.join(DEBUG_DIR);
    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }

    let input = ProjectInput::new(&plan.root, &plan.marker)
        .with_schema(schema)
        .with_state(state);
    let ctx = pipeline.run(input)?;

    for diag in ctx.diagnostics.iter().filter(|d| d.severity.is_info()) {
        tracing::info!(kind = %diag.kind, "{}", diag.message);
    }

    let generator = Generator::from_context(&ctx);
    let outcome = if generator.is_empty() {
        ProjectOutcome::NothingToGenerate
    } else if opts.dry_run {
        ProjectOutcome::Preview(generator.preview())
    } else {
        ProjectOutcome::Written(generator.generate(&plan.output_dir)?.written)
    };

    let mut report = ProjectReport::new(&plan.root, &plan.output_dir, outcome);
    report.diagnostics = ctx.warnings().cloned().collect();
    report.debug_dir = opts.visualize.then_some(debug_dir);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;
    use tfexpose_config::Tool;

    use super::*;
    use crate::terraform::ToolRunner;

    const SCHEMA: &str = r#"{
        "format_version": "1.0",
        "provider_schemas": {
            "registry.terraform.io/hashicorp/aws": {
                "resource_schemas": {"aws_vpc": {}, "aws_thing": {}},
                "data_source_schemas": {
                    "aws_vpc": {"block": {"attributes": {"id": {"type": "string", "required": true}}}}
                }
            }
        }
    }"#;

    const STATE: &str = r#"{
        "values": {"root_module": {"resources": [
            {"address": "aws_vpc.main", "type": "aws_vpc", "name": "main", "values": {"id": "vpc-123"}}
        ]}}
    }"#;

    const MAIN_TF: &str = "# @public\noutput \"vpc_id\" {\n  value = aws_vpc.main.id\n}\n";

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(state: &str) -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("schema.json"), SCHEMA).unwrap();
            fs::write(dir.path().join("state.json"), state).unwrap();
            Self { dir }
        }

        fn project(&self, name: &str, main_tf: &str) -> ProjectPlan {
            let root = self.dir.path().join(name);
            fs::create_dir_all(&root).unwrap();
            fs::write(root.join("main.tf"), main_tf).unwrap();
            ProjectPlan {
                output_dir: root.join("interface"),
                root,
                marker: "@public".to_string(),
            }
        }

        fn snapshots(&self) -> Snapshots {
            Snapshots::new(ToolRunner::new(Tool::Terraform, None))
                .with_schema_file(Some(self.dir.path().join("schema.json")))
                .with_state_file(Some(self.dir.path().join("state.json")))
        }
    }

    fn written_names(outcome: &ProjectOutcome) -> Vec<String> {
        match outcome {
            ProjectOutcome::Written(paths) => paths
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect(),
            other => panic!("expected written files, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_writes_interface() {
        let fixture = Fixture::new(STATE);
        let plan = fixture.project("network", MAIN_TF);

        let report = generate(&[plan.clone()], &fixture.snapshots(), GenerateOptions::default());

        assert!(!report.has_failures());
        assert_eq!(
            written_names(&report.projects[0].outcome),
            vec![
                "generated_data.tf",
                "generated_outputs.tf",
                "generated_providers.tf"
            ]
        );
        let data = fs::read_to_string(plan.output_dir.join("generated_data.tf")).unwrap();
        assert_eq!(data, "data \"aws_vpc\" \"main\" {\n  id = \"vpc-123\"\n}\n");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixture = Fixture::new(STATE);
        let plan = fixture.project("network", MAIN_TF);
        let opts = GenerateOptions {
            dry_run: true,
            ..GenerateOptions::default()
        };

        let report = generate(&[plan.clone()], &fixture.snapshots(), opts);

        match &report.projects[0].outcome {
            ProjectOutcome::Preview(files) => {
                assert_eq!(files.len(), 3);
                assert_eq!(
                    files[1].content,
                    "output \"vpc_id\" {\n  value = data.aws_vpc.main.id\n}\n"
                );
            }
            other => panic!("expected preview, got {other:?}"),
        }
        assert!(!plan.output_dir.exists());
    }

    #[test]
    fn test_unapplied_project_is_skipped() {
        let fixture = Fixture::new(r#"{"format_version": "1.0"}"#);
        let plan = fixture.project("network", MAIN_TF);

        let report = generate(&[plan.clone()], &fixture.snapshots(), GenerateOptions::default());

        assert!(matches!(report.projects[0].outcome, ProjectOutcome::NotApplied));
        assert!(!report.has_failures());
        assert!(!plan.output_dir.exists());
    }

    #[test]
    fn test_unmatched_declarations_generate_nothing() {
        let fixture = Fixture::new(STATE);
        let plan = fixture.project(
            "network",
            "# @public\noutput \"thing\" {\n  value = aws_thing.a.id\n}\n",
        );

        let report = generate(&[plan.clone()], &fixture.snapshots(), GenerateOptions::default());

        let project = &report.projects[0];
        assert!(matches!(project.outcome, ProjectOutcome::NothingToGenerate));
        assert_eq!(project.diagnostics.len(), 1);
        assert_eq!(
            project.diagnostics[0].message,
            "Annotated resource aws_thing.a at line 2 in main.tf does not have a matching data resource!"
        );
        assert!(!plan.output_dir.exists());
    }

    #[test]
    fn test_failed_project_does_not_stop_the_rest() {
        let fixture = Fixture::new(STATE);
        let first = fixture.project("first", MAIN_TF);
        let second = fixture.project("second", MAIN_TF);
        let snapshots = Snapshots::new(ToolRunner::new(Tool::Terraform, None))
            .with_schema_file(Some(fixture.dir.path().join("schema.json")))
            .with_state_file(Some(Path::new("/nonexistent/state.json").to_path_buf()));

        let report = generate(&[first, second], &snapshots, GenerateOptions::default());

        assert_eq!(report.projects.len(), 2);
        assert!(report.projects.iter().all(ProjectReport::is_failed));
        match &report.projects[0].outcome {
            ProjectOutcome::Failed(message) => {
                assert!(message.starts_with("state snapshot unavailable"))
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_declaration_file_fails_only_its_project() {
        let fixture = Fixture::new(STATE);
        let broken = fixture.project("broken", MAIN_TF);
        fs::write(broken.root.join("variables.tf"), b"# @public\n\xff\xfe\n").unwrap();
        let healthy = fixture.project("healthy", MAIN_TF);

        let report = generate(
            &[broken, healthy.clone()],
            &fixture.snapshots(),
            GenerateOptions::default(),
        );

        assert_eq!(report.projects.len(), 2);
        match &report.projects[0].outcome {
            ProjectOutcome::Failed(message) => {
                assert!(message.starts_with("failed to read"), "{message}");
                assert!(message.contains("variables.tf"), "{message}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(
            written_names(&report.projects[1].outcome).len(),
            3,
            "the next project still runs"
        );
        assert!(healthy.output_dir.join("generated_data.tf").exists());
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let fixture = Fixture::new("not json");
        let plans = [
            fixture.project("a", MAIN_TF),
            fixture.project("b", MAIN_TF),
            fixture.project("c", MAIN_TF),
        ];
        let opts = GenerateOptions {
            fail_fast: true,
            ..GenerateOptions::default()
        };

        let report = generate(&plans, &fixture.snapshots(), opts);

        assert_eq!(report.projects.len(), 1);
        assert_eq!(report.skipped_after_failure, 2);
        assert!(report.has_failures());
    }

    #[test]
    fn test_visualize_writes_phase_snapshots() {
        let fixture = Fixture::new(STATE);
        let plan = fixture.project("network", MAIN_TF);
        let opts = GenerateOptions {
            visualize: true,
            ..GenerateOptions::default()
        };

        let report = generate(&[plan.clone()], &fixture.snapshots(), opts);

        let debug_dir = plan.root.join(DEBUG_DIR);
        assert_eq!(report.projects[0].debug_dir.as_deref(), Some(debug_dir.as_path()));
        for phase in ["scan", "resolve", "match", "extract"] {
            assert!(debug_dir.join(format!("{phase}.json")).exists(), "{phase}");
        }
    }

    #[test]
    fn test_rerun_overwrites_previous_files() {
        let fixture = Fixture::new(STATE);
        let plan = fixture.project("network", MAIN_TF);
        fs::create_dir_all(&plan.output_dir).unwrap();
        fs::write(plan.output_dir.join("generated_outputs.tf"), "stale").unwrap();

        generate(&[plan.clone()], &fixture.snapshots(), GenerateOptions::default());

        let outputs = fs::read_to_string(plan.output_dir.join("generated_outputs.tf")).unwrap();
        assert!(outputs.starts_with("output \"vpc_id\""));
    }
}
