//! Attribute lookup in the state snapshot.

use serde_json::Value;
use tfexpose_snapshot::{StateResource, StateSnapshot};

/// Reads attribute values of resources recorded in state.
#[derive(Debug, Clone, Copy)]
pub struct StateExtractor<'a> {
    state: &'a StateSnapshot,
}

impl<'a> StateExtractor<'a> {
    pub fn new(state: &'a StateSnapshot) -> Self {
        Self { state }
    }

    /// The resource whose address equals `address` exactly.
    pub fn resource(&self, address: &str) -> Option<&'a StateResource> {
        self.state.find(address)
    }

    /// Value of `attribute` on the resource at `address`, if both are present.
    pub fn extract(&self, address: &str, attribute: &str) -> Option<&'a Value> {
        self.resource(address)?.values.get(attribute)
    }
}
