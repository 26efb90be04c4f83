// Captured-output data model for NetDrift
// This crate defines the externally owned capture records and the data source
// seam the comparison engine consumes them through

mod output;
mod source;

pub use output::CapturedOutput;
pub use source::{CommandData, MemorySource, OutputSource, StructuredPair};
