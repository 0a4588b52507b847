//! Obtains the state and provider schema snapshots of a project.
//!
//! Snapshots come from running the configured tool (`terraform` or `tofu`)
//! inside the project directory, or from pre-captured JSON files.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tfexpose_codegen::{Error, Result};
use tfexpose_config::Tool;
use tfexpose_snapshot::{ProviderSchemaSnapshot, SnapshotKind, StateSnapshot};

const SHOW_ARGS: &[&str] = &["show", "-json"];
const SCHEMA_ARGS: &[&str] = &["providers", "schema", "-json"];

/// Runs the infrastructure tool, directly or through `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    tool: Tool,
    shell: Option<String>,
}

impl ToolRunner {
    pub fn new(tool: Tool, shell: Option<String>) -> Self {
        Self { tool, shell }
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.tool, args.join(" "))
    }

    fn command(&self, project: &Path, args: &[&str]) -> Command {
        let mut cmd = match &self.shell {
            Some(shell) => {
                let mut cmd = Command::new(shell);
                cmd.arg("-c").arg(self.command_line(args));
                cmd
            }
            None => {
                let mut cmd = Command::new(self.tool.as_str());
                cmd.args(args);
                cmd
            }
        };
        cmd.current_dir(project);
        cmd
    }

    /// Run the tool in `project` and return its stdout.
    fn run(&self, project: &Path, args: &[&str], kind: SnapshotKind) -> Result<String> {
        let line = self.command_line(args);
        tracing::debug!(project = %project.display(), command = %line, "running");

        let output = self.command(project, args).output().map_err(|e| {
            Error::snapshot_unavailable(kind.to_string(), format!("failed to run `{line}`: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::snapshot_unavailable(
                kind.to_string(),
                format!("`{line}` exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            let reason = format!("`{line}` printed invalid UTF-8: {e}");
            Error::snapshot_unavailable(kind.to_string(), reason)
        })
    }
}

/// Where each snapshot of a project comes from.
///
/// A file, when given, replaces the tool invocation for that snapshot and
/// is used for every project.
#[derive(Debug, Clone)]
pub struct Snapshots {
    runner: ToolRunner,
    schema_file: Option<PathBuf>,
    state_file: Option<PathBuf>,
}

impl Snapshots {
    pub fn new(runner: ToolRunner) -> Self {
        Self {
            runner,
            schema_file: None,
            state_file: None,
        }
    }

    pub fn with_schema_file(mut self, path: Option<PathBuf>) -> Self {
        self.schema_file = path;
        self
    }

    pub fn with_state_file(mut self, path: Option<PathBuf>) -> Self {
        self.state_file = path;
        self
    }

    /// The applied state of `project` (`show -json`).
    pub fn state(&self, project: &Path) -> Result<StateSnapshot> {
        let kind = SnapshotKind::State;
        let json = self.fetch(project, self.state_file.as_deref(), SHOW_ARGS, kind)?;
        StateSnapshot::from_json(&json).map_err(|e| parse_failure(kind, e))
    }

    /// The provider schemas installed in `project` (`providers schema -json`).
    pub fn schema(&self, project: &Path) -> Result<ProviderSchemaSnapshot> {
        let kind = SnapshotKind::ProviderSchemas;
        let json = self.fetch(project, self.schema_file.as_deref(), SCHEMA_ARGS, kind)?;
        ProviderSchemaSnapshot::from_json(&json).map_err(|e| parse_failure(kind, e))
    }

    fn fetch(
        &self,
        project: &Path,
        file: Option<&Path>,
        args: &[&str],
        kind: SnapshotKind,
    ) -> Result<String> {
        match file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "reading {kind} snapshot");
                fs::read_to_string(path).map_err(|e| {
                    Error::snapshot_unavailable(
                        kind.to_string(),
                        format!("failed to read '{}': {e}", path.display()),
                    )
                })
            }
            None => self.runner.run(project, args, kind),
        }
    }
}

fn parse_failure(kind: SnapshotKind, err: tfexpose_snapshot::SnapshotError) -> Error {
    Error::snapshot_unavailable(kind.to_string(), format!("{:#}", eyre::Report::new(err)))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn offline(dir: &TempDir, state: &str, schema: &str) -> Snapshots {
        let state_path = dir.path().join("state.json");
        let schema_path = dir.path().join("schema.json");
        fs::write(&state_path, state).unwrap();
        fs::write(&schema_path, schema).unwrap();

        Snapshots::new(ToolRunner::new(Tool::Terraform, None))
            .with_state_file(Some(state_path))
            .with_schema_file(Some(schema_path))
    }

    #[test]
    fn test_command_line() {
        let runner = ToolRunner::new(Tool::Tofu, Some("bash".to_string()));
        assert_eq!(runner.command_line(SHOW_ARGS), "tofu show -json");
        assert_eq!(
            runner.command_line(SCHEMA_ARGS),
            "tofu providers schema -json"
        );
    }

    #[test]
    fn test_offline_snapshots() {
        let dir = TempDir::new().unwrap();
        let snapshots = offline(
            &dir,
            r#"{"values": {"root_module": {"resources": [{"address": "aws_vpc.main"}]}}}"#,
            r#"{"provider_schemas": {"hashicorp/aws": {}}}"#,
        );

        let state = snapshots.state(dir.path()).unwrap();
        assert!(state.is_applied());
        let schema = snapshots.schema(dir.path()).unwrap();
        assert_eq!(schema.providers().count(), 1);
    }

    #[test]
    fn test_unparsable_snapshot_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let snapshots = offline(&dir, "not json", "{}");

        let err = snapshots.state(dir.path()).unwrap_err();
        assert!(matches!(err, Error::SnapshotUnavailable { ref what, .. } if what == "state"));
        assert!(err.to_string().starts_with("state snapshot unavailable: failed to parse"));
    }

    #[test]
    fn test_missing_snapshot_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let snapshots = Snapshots::new(ToolRunner::new(Tool::Terraform, None))
            .with_schema_file(Some(dir.path().join("missing.json")));

        let err = snapshots.schema(dir.path()).unwrap_err();
        assert!(
            matches!(err, Error::SnapshotUnavailable { ref what, .. } if what == "provider schema")
        );
    }

    #[test]
    fn test_missing_shell_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let snapshots = Snapshots::new(ToolRunner::new(
            Tool::Terraform,
            Some("/nonexistent/tfexpose-shell".to_string()),
        ));

        let err = snapshots.state(dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to run `terraform show -json`"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_unavailable() {
        let dir = TempDir::new().unwrap();
        // Exits non-zero whether or not terraform is installed.
        let runner = ToolRunner::new(Tool::Terraform, Some("sh".to_string()));

        let err = runner
            .run(dir.path(), &["show", "-json;", "exit", "3"], SnapshotKind::State)
            .unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
