use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tfexpose_config::{CONFIG_FILE, Config, ProjectConfig};

use super::{UnwrapOrExit, validate_marker};
use crate::{
    logging, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ScanCommand {
    /// Project directory to scan
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Comment marker that tags an output as public (defaults to tfexpose.toml, then @public)
    #[arg(short, long)]
    pub marker: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ScanCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::from_file_or_default(CONFIG_FILE).unwrap_or_exit();
        logging::init(self.verbose || config.settings.verbose);

        let marker = match &self.marker {
            Some(marker) => {
                validate_marker(marker)?;
                marker.clone()
            }
            None => {
                let project = config
                    .project(&self.project)
                    .cloned()
                    .unwrap_or_else(|| ProjectConfig::new(&self.project));
                project.marker(&config.settings).to_string()
            }
        };

        let report = ops::scan(&self.project, &marker)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
