//! Applied state snapshot (`show -json`).

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{SnapshotError, SnapshotKind};

/// Root of the state document.
///
/// A project that has never been applied yields a document without
/// `values`, which parses to an empty snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub format_version: Option<String>,

    #[serde(default)]
    pub terraform_version: Option<String>,

    #[serde(default)]
    pub values: Option<StateValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateValues {
    #[serde(default)]
    pub root_module: RootModule,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootModule {
    #[serde(default)]
    pub resources: Vec<StateResource>,
}

/// One resource instance recorded in state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateResource {
    /// Full address, e.g. "aws_instance.foo".
    pub address: String,

    #[serde(default)]
    pub mode: Option<String>,

    #[serde(rename = "type", default)]
    pub ty: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub provider_name: Option<String>,

    /// Attribute name → recorded value.
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl StateResource {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl StateSnapshot {
    /// Parse the JSON emitted by `show -json`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::parse(SnapshotKind::State, e))
    }

    /// Build a snapshot from a list of resources.
    pub fn from_resources(resources: impl IntoIterator<Item = StateResource>) -> Self {
        Self {
            values: Some(StateValues {
                root_module: RootModule {
                    resources: resources.into_iter().collect(),
                },
            }),
            ..Self::default()
        }
    }

    /// Root module resources in document order.
    pub fn resources(&self) -> &[StateResource] {
        self.values
            .as_ref()
            .map(|v| v.root_module.resources.as_slice())
            .unwrap_or_default()
    }

    /// Whether the state records any resources, i.e. the project has been applied.
    pub fn is_applied(&self) -> bool {
        !self.resources().is_empty()
    }

    /// The first resource whose address equals `address` exactly.
    pub fn find(&self, address: &str) -> Option<&StateResource> {
        self.resources().iter().find(|r| r.address == address)
    }
}

impl FromStr for StateSnapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const STATE_JSON: &str = r#"{
        "format_version": "1.0",
        "terraform_version": "1.7.5",
        "values": {
            "root_module": {
                "resources": [
                    {
                        "address": "aws_instance.foo",
                        "mode": "managed",
                        "type": "aws_instance",
                        "name": "foo",
                        "provider_name": "registry.terraform.io/hashicorp/aws",
                        "values": {"id": "i-123", "ami": "ami-42", "monitoring": false}
                    },
                    {
                        "address": "data.aws_ami.ubuntu",
                        "mode": "data",
                        "type": "aws_ami",
                        "name": "ubuntu",
                        "values": {"id": "ami-42"}
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_parse_state_snapshot() {
        let state = StateSnapshot::from_json(STATE_JSON).unwrap();

        assert!(state.is_applied());
        assert_eq!(state.resources().len(), 2);
        let foo = state.find("aws_instance.foo").unwrap();
        assert_eq!(foo.ty.as_deref(), Some("aws_instance"));
        assert_eq!(foo.values["id"], json!("i-123"));
        assert_eq!(foo.values["monitoring"], json!(false));
    }

    #[test]
    fn test_find_requires_exact_address() {
        let state = StateSnapshot::from_json(STATE_JSON).unwrap();

        assert!(state.find("aws_instance.fo").is_none());
        assert!(state.find("aws_instance").is_none());
        assert!(state.find("aws_ami.ubuntu").is_none());
        assert!(state.find("data.aws_ami.ubuntu").is_some());
    }

    #[test]
    fn test_unapplied_state() {
        let state: StateSnapshot = r#"{"format_version": "1.0"}"#.parse().unwrap();

        assert!(!state.is_applied());
        assert!(state.resources().is_empty());
        assert!(state.find("aws_instance.foo").is_none());
    }

    #[test]
    fn test_from_resources() {
        let state = StateSnapshot::from_resources([
            StateResource::new("random_pet.name").with_value("id", "happy-cat")
        ]);

        assert_eq!(state.find("random_pet.name").unwrap().values["id"], json!("happy-cat"));
    }

    #[test]
    fn test_invalid_json_reports_kind() {
        let err = StateSnapshot::from_json("{").unwrap_err();
        assert_eq!(err.kind(), SnapshotKind::State);
    }
}
