use output_diff::RecordSetError;
use thiserror::Error;

/// Errors produced by the comparison engine.
///
/// The pure comparison functions are total; these errors come from data
/// resolution and session control, not from diffing itself.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Baseline or snapshot output is missing for a command.
    ///
    /// Distinct from "identical": a caller must never read absent data as an
    /// empty difference.
    #[error("no captured output found for command '{command}'")]
    DataNotFound { command: String },

    /// A record set violated its identity precondition
    #[error("malformed structured input: {0}")]
    MalformedInput(#[from] RecordSetError),

    /// The session was cancelled while a batch was in flight.
    ///
    /// Normal termination, not a failure; any partial results are discarded.
    #[error("comparison cancelled")]
    Cancelled,

    /// The data source failed to resolve captured output
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}
