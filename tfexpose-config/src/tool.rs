//! External infrastructure tool selection.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// The command-line tool that produces the state and schema snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// HashiCorp Terraform
    #[default]
    Terraform,
    /// OpenTofu
    Tofu,
}

impl Tool {
    /// Returns the executable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Terraform => "terraform",
            Tool::Tofu => "tofu",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terraform" | "tf" => Ok(Tool::Terraform),
            "tofu" | "opentofu" => Ok(Tool::Tofu),
            _ => Err(format!(
                "unknown tool '{}', expected 'terraform' or 'tofu'",
                s
            )),
        }
    }
}
