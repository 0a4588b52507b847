//! Resource reference grammar.
//!
//! ```text
//! reference      = type "." name ( "." attribute-path )?
//! attribute-path = identifier ( "." identifier )*
//! identifier     = ( letter | "_" ) ( letter | digit | "_" | "-" )*
//! ```
//!
//! Anything else (index expressions, function calls, interpolation) is
//! rejected rather than truncated.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Why a reference expression could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("'{expression}' has fewer than two dotted components")]
    TooFewComponents { expression: String },

    #[error("'{expression}' contains an empty component")]
    EmptyComponent { expression: String },

    #[error("'{component}' in '{expression}' is not a plain identifier")]
    InvalidIdentifier {
        expression: String,
        component: String,
    },
}

/// `type.name.attribute.path`, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceReference {
    pub resource_type: String,
    pub resource_name: String,
    /// Dotted path below the resource; empty for a bare `type.name`.
    pub attribute_path: String,
}

impl ResourceReference {
    pub fn parse(expression: &str) -> Result<Self, ReferenceError> {
        let expression = expression.trim();
        let components: Vec<&str> = expression.split('.').collect();

        if components.len() < 2 {
            return Err(ReferenceError::TooFewComponents {
                expression: expression.to_string(),
            });
        }
        if components.iter().any(|c| c.is_empty()) {
            return Err(ReferenceError::EmptyComponent {
                expression: expression.to_string(),
            });
        }
        if let Some(bad) = components.iter().find(|c| !is_identifier(c)) {
            return Err(ReferenceError::InvalidIdentifier {
                expression: expression.to_string(),
                component: bad.to_string(),
            });
        }

        Ok(Self {
            resource_type: components[0].to_string(),
            resource_name: components[1].to_string(),
            attribute_path: components[2..].join("."),
        })
    }

    /// Resource address, `type.name`.
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_name)
    }

    /// The same path read through the matching data source.
    pub fn data_expression(&self) -> String {
        format!("data.{}", self)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.resource_name)?;
        if !self.attribute_path.is_empty() {
            write!(f, ".{}", self.attribute_path)?;
        }
        Ok(())
    }
}

impl FromStr for ResourceReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
