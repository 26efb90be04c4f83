// NetDrift comparison engine
// Orchestrates baseline/snapshot comparison across batches of device commands

mod error;
mod session;
mod status_cache;

pub use error::CompareError;
pub use session::{CommandStatus, ComparisonResult, ComparisonSession};
pub use status_cache::DiffStatusCache;
