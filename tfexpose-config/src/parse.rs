//! Configuration parsing from files and strings.

use std::{path::Path, str::FromStr};

use crate::{CONFIG_FILE, Config, Error, Result, SourceContext, validate::validate_config};

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, CONFIG_FILE)
    }
}

impl Config {
    /// Parse a configuration file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse the configuration file if it exists, otherwise use defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a configuration from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

/// Parse a configuration from content with the given filename for error reporting.
fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let source_ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_config(&config, &source_ctx)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::Tool;

    #[test]
    fn test_parse_full_config() {
        let config: Config = r#"
            [settings]
            command = "tofu"
            shell = "bash"
            marker = "@interface"
            output_dir = "exports"
            verbose = true

            [[projects]]
            path = "infra/network"

            [[projects]]
            path = "infra/dns"
            output_dir = "public"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.settings.command, Tool::Tofu);
        assert_eq!(config.settings.shell.as_deref(), Some("bash"));
        assert_eq!(config.settings.marker, "@interface");
        assert!(config.settings.verbose);
        assert_eq!(config.projects.len(), 2);
        assert_eq!(
            config.projects[1].output_dir(&config.settings),
            PathBuf::from("infra/dns/public")
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = r#"
            [[projects]]
            path = "/example/path"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.settings.command, Tool::Terraform);
        assert_eq!(config.settings.marker, "@public");
        assert!(config.settings.shell.is_none());
        assert_eq!(config.projects[0].path, PathBuf::from("/example/path"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = "".parse().unwrap();
        assert!(config.projects.is_empty());
        assert_eq!(config.projects_or_current().len(), 1);
    }

    #[test]
    fn test_invalid_toml() {
        let err = "[settings\nshell = \"bash\"".parse::<Config>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let err = "[settings]\nuse_tofu = true".parse::<Config>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let err = "[settings]\ncommand = \"pulumi\"".parse::<Config>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = Config::from_file(temp.path().join("tfexpose.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_from_file_or_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tfexpose.toml");

        let config = Config::from_file_or_default(&path).unwrap();
        assert!(config.projects.is_empty());

        std::fs::write(&path, "[[projects]]\npath = \"app\"\n").unwrap();
        let config = Config::from_file_or_default(&path).unwrap();
        assert_eq!(config.projects.len(), 1);
    }
}
