use std::path::PathBuf;

use clap::Args;
use eyre::{Result, ensure};
use tfexpose_config::{CONFIG_FILE, Config, ProjectConfig, Tool};

use super::{UnwrapOrExit, validate_marker};
use crate::{
    logging,
    ops::{self, GenerateOptions, ProjectPlan},
    reports::{Report, TerminalOutput},
    terraform::{Snapshots, ToolRunner},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to tfexpose.toml (a missing default file means default settings)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Project directory to process; repeatable, replaces the configured projects
    #[arg(short, long = "project", value_name = "PATH")]
    pub projects: Vec<PathBuf>,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Run `tofu` instead of `terraform`
    #[arg(long)]
    pub use_tofu: bool,

    /// Run the tool through `<SHELL> -c`
    #[arg(long)]
    pub shell: Option<String>,

    /// Comment marker that tags an output as public
    #[arg(short, long)]
    pub marker: Option<String>,

    /// Output directory, relative to each project
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Read the provider schema snapshot from a file instead of running the tool
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Read the state snapshot from a file instead of running the tool
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Stop at the first project that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write per-phase pipeline snapshots to <project>/.tfexpose/debug
    #[arg(long)]
    pub visualize: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = Config::from_file_or_default(&self.config).unwrap_or_exit();
        logging::init(self.verbose || config.settings.verbose);

        if let Some(marker) = &self.marker {
            validate_marker(marker)?;
        }
        if let Some(dir) = &self.output_dir {
            ensure!(
                dir.is_relative(),
                "--output-dir must be relative to the project: '{}'",
                dir.display()
            );
        }

        // CLI flags win over tfexpose.toml
        let tool = if self.use_tofu {
            Tool::Tofu
        } else {
            config.settings.command
        };
        let shell = self.shell.clone().or_else(|| config.settings.shell.clone());
        let snapshots = Snapshots::new(ToolRunner::new(tool, shell))
            .with_schema_file(self.schema.clone())
            .with_state_file(self.state.clone());

        let opts = GenerateOptions {
            dry_run: self.dry_run,
            fail_fast: self.fail_fast,
            visualize: self.visualize,
        };
        let report = ops::generate(&self.plans(&config), &snapshots, opts);
        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn plans(&self, config: &Config) -> Vec<ProjectPlan> {
        let projects = if self.projects.is_empty() {
            config.projects_or_current()
        } else {
            self.projects
                .iter()
                .map(|path| {
                    config
                        .project(path)
                        .cloned()
                        .unwrap_or_else(|| ProjectConfig::new(path))
                })
                .collect()
        };

        projects
            .iter()
            .map(|project| ProjectPlan {
                root: project.path.clone(),
                marker: self
                    .marker
                    .clone()
                    .unwrap_or_else(|| project.marker(&config.settings).to_string()),
                output_dir: match &self.output_dir {
                    Some(dir) => project.path.join(dir),
                    None => project.output_dir(&config.settings),
                },
            })
            .collect()
    }
}
