//! The generated files.
//!
//! - [`DataTf`] - `generated_data.tf`, one data block per matched resource
//! - [`OutputsTf`] - `generated_outputs.tf`, one output per exposed declaration
//! - [`ProvidersTf`] - `generated_providers.tf`, the `required_providers` block

mod data_tf;
mod outputs_tf;
mod providers_tf;

pub use data_tf::{DATA_FILE, DataTf};
pub use outputs_tf::{OUTPUTS_FILE, OutputsTf};
pub use providers_tf::{PROVIDERS_FILE, ProviderRequirement, ProvidersTf};
