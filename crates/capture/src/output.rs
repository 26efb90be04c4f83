/// One captured command output, owned by the external capture subsystem.
///
/// Immutable once created: a re-capture produces a new record with a new id,
/// never an in-place update. The comparison engine only reads
/// `normalized_text` (and any parsed structured view delivered alongside).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Unique id of this capture, stable for its lifetime
    pub id: String,
    /// The device this output was captured from
    pub device_id: String,
    /// The command that produced this output
    pub command: String,
    /// The raw output as received from the device
    pub raw_text: String,
    /// The canonicalized output, produced by the external normalizer
    pub normalized_text: String,
    /// Capture timestamp (seconds since epoch)
    pub captured_at: i64,
    /// Capture format version
    pub version: u32,
}
