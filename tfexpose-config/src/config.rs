use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Tool;

/// Comment marker that tags an output as publicly exposable.
pub const DEFAULT_MARKER: &str = "@public";

/// Directory, relative to each project, receiving the generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "interface";

/// Root of tfexpose.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Settings shared by all projects
    #[serde(default)]
    pub settings: Settings,

    /// Projects to process, in order
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

/// The `[settings]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    /// Tool used to obtain state and schema snapshots
    pub command: Tool,

    /// Shell used to run the tool; the tool is spawned directly when unset
    pub shell: Option<String>,

    /// Comment marker token
    pub marker: String,

    /// Output directory relative to each project
    pub output_dir: PathBuf,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command: Tool::default(),
            shell: None,
            marker: DEFAULT_MARKER.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verbose: false,
        }
    }
}

/// A `[[projects]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project root, relative to the working directory
    pub path: PathBuf,

    /// Overrides `settings.output_dir`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Overrides `settings.marker`
    #[serde(default)]
    pub marker: Option<String>,
}

impl ProjectConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output_dir: None,
            marker: None,
        }
    }

    /// Directory receiving this project's generated files.
    pub fn output_dir(&self, settings: &Settings) -> PathBuf {
        let dir = self.output_dir.as_deref().unwrap_or(&settings.output_dir);
        self.path.join(dir)
    }

    /// Marker token for this project.
    pub fn marker<'a>(&'a self, settings: &'a Settings) -> &'a str {
        self.marker.as_deref().unwrap_or(&settings.marker)
    }
}

impl Config {
    /// Projects to process; the current directory when none are configured.
    pub fn projects_or_current(&self) -> Vec<ProjectConfig> {
        if self.projects.is_empty() {
            vec![ProjectConfig::new(".")]
        } else {
            self.projects.clone()
        }
    }

    /// The configured project with exactly this path.
    pub fn project(&self, path: &Path) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.command, Tool::Terraform);
        assert_eq!(settings.marker, "@public");
        assert_eq!(settings.output_dir, PathBuf::from("interface"));
        assert!(settings.shell.is_none());
        assert!(!settings.verbose);
    }

    #[test]
    fn test_project_overrides() {
        let settings = Settings::default();
        let mut project = ProjectConfig::new("infra/network");

        assert_eq!(
            project.output_dir(&settings),
            PathBuf::from("infra/network/interface")
        );
        assert_eq!(project.marker(&settings), "@public");

        project.output_dir = Some(PathBuf::from("exports"));
        project.marker = Some("@interface".to_string());
        assert_eq!(
            project.output_dir(&settings),
            PathBuf::from("infra/network/exports")
        );
        assert_eq!(project.marker(&settings), "@interface");
    }

    #[test]
    fn test_projects_or_current() {
        let config = Config::default();
        let projects = config.projects_or_current();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].path, PathBuf::from("."));
        assert!(config.project(Path::new(".")).is_none());
    }
}
