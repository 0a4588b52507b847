//! Built-in pipeline phases.
//!
//! - [`ScanPhase`] - finds annotated outputs in the declaration tree
//! - [`ResolvePhase`] - parses each reference expression
//! - [`MatchPhase`] - keeps declarations whose resource type has a data source
//! - [`ExtractPhase`] - reads required attribute values from state

mod extract;
mod matching;
mod resolve;
mod scan;

pub use extract::ExtractPhase;
pub use matching::MatchPhase;
pub use resolve::ResolvePhase;
pub use scan::ScanPhase;
