//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an [`Output`].

mod generate;
mod output;
mod scan;

pub use generate::{GenerateReport, ProjectOutcome, ProjectReport};
pub use output::{Report, TerminalOutput};
pub use scan::{ScanEntry, ScanReport};

#[cfg(test)]
pub(crate) use output::BufferOutput;
