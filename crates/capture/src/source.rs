use anyhow::Result;
use std::collections::{HashMap, HashSet};

use output_diff::RecordSet;

use crate::output::CapturedOutput;

/// The parsed tabular views of one command on both sides
#[derive(Debug, Clone)]
pub struct StructuredPair {
    /// Records parsed from the baseline output
    pub baseline: RecordSet,
    /// Records parsed from the snapshot output
    pub snapshot: RecordSet,
}

/// Everything a source can deliver for one command of one comparison
#[derive(Debug, Clone)]
pub struct CommandData {
    /// The baseline capture
    pub baseline: CapturedOutput,
    /// The snapshot capture
    pub snapshot: CapturedOutput,
    /// Parsed records for both sides, when the extractor produced them
    pub structured: Option<StructuredPair>,
    /// Whether this command is marked as structurally supported.
    ///
    /// An explicit capability flag from the source; the comparison engine
    /// never infers structure from raw text.
    pub structured_supported: bool,
}

/// Access to captured output, implemented by the capture/storage subsystem.
///
/// A `baseline_ref`/`snapshot_ref` names one stored capture run (for example
/// a capture-session id). Returns `Ok(None)` when either side has no capture
/// for the command.
pub trait OutputSource: Sync {
    /// Resolve both sides of one command for a baseline/snapshot pairing
    fn resolve(
        &self,
        baseline_ref: &str,
        snapshot_ref: &str,
        command: &str,
    ) -> Result<Option<CommandData>>;
}

/// An in-memory [`OutputSource`], used by tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Captures keyed by (capture-run reference, command)
    captures: HashMap<(String, String), CapturedOutput>,

    /// Parsed records keyed by (capture-run reference, command)
    records: HashMap<(String, String), RecordSet>,

    /// Commands marked as structurally supported
    structured_commands: HashSet<String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a capture under a capture-run reference
    pub fn add_capture(&mut self, reference: impl Into<String>, output: CapturedOutput) {
        self.captures
            .insert((reference.into(), output.command.clone()), output);
    }

    /// Store parsed records for one command of one capture run
    pub fn add_records(
        &mut self,
        reference: impl Into<String>,
        command: impl Into<String>,
        records: RecordSet,
    ) {
        self.records.insert((reference.into(), command.into()), records);
    }

    /// Mark a command as structurally supported
    pub fn mark_structured(&mut self, command: impl Into<String>) {
        self.structured_commands.insert(command.into());
    }
}

impl OutputSource for MemorySource {
    fn resolve(
        &self,
        baseline_ref: &str,
        snapshot_ref: &str,
        command: &str,
    ) -> Result<Option<CommandData>> {
        let baseline_key = (baseline_ref.to_string(), command.to_string());
        let snapshot_key = (snapshot_ref.to_string(), command.to_string());

        let (baseline, snapshot) = match (
            self.captures.get(&baseline_key),
            self.captures.get(&snapshot_key),
        ) {
            (Some(b), Some(s)) => (b.clone(), s.clone()),
            _ => return Ok(None),
        };

        let structured_supported = self.structured_commands.contains(command);

        let structured = if structured_supported {
            match (self.records.get(&baseline_key), self.records.get(&snapshot_key)) {
                (Some(b), Some(s)) => Some(StructuredPair {
                    baseline: b.clone(),
                    snapshot: s.clone(),
                }),
                _ => None,
            }
        } else {
            None
        };

        Ok(Some(CommandData {
            baseline,
            snapshot,
            structured,
            structured_supported,
        }))
    }
}
