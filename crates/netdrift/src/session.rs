use derive_more::Display;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use capture::{CommandData, OutputSource};
use output_diff::{compare_record_sets, StructuredDiff, TextDiff};

use crate::error::CompareError;
use crate::status_cache::DiffStatusCache;

/// Per-command outcome of a batch status query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CommandStatus {
    /// Baseline and snapshot agree for this command
    #[display(fmt = "Unchanged")]
    Unchanged,

    /// Baseline and snapshot differ for this command
    #[display(fmt = "Changed")]
    Changed,

    /// Baseline or snapshot output could not be resolved.
    ///
    /// Kept distinct from [`CommandStatus::Unchanged`]: absent data is not
    /// an absent difference.
    #[display(fmt = "Unresolved")]
    Unresolved,
}

impl CommandStatus {
    /// Check if this command is known to differ
    pub fn has_difference(&self) -> bool {
        *self == CommandStatus::Changed
    }

    /// Check if both sides were resolved
    pub fn is_resolved(&self) -> bool {
        *self != CommandStatus::Unresolved
    }
}

/// The full comparison result for one command
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// Whether the two outputs are identical.
    ///
    /// Derived from the structured diff when one is present, otherwise from
    /// the positional text diff.
    pub identical: bool,

    /// Rendered positional diff of the normalized text, always computed so
    /// the caller can offer a raw view even for structured commands
    pub text_diff: String,

    /// Field-level diff, present only when the source marked the command as
    /// structurally supported and delivered parsed records for both sides
    pub structured: Option<StructuredDiff>,
}

/// One comparison session between a baseline capture run and a snapshot
/// capture run.
///
/// Owns the per-session status cache; dropping the session drops the cache.
/// Full diffs are recomputed on every request since they can be large.
pub struct ComparisonSession<S: OutputSource> {
    /// Access to captured output, owned by the capture subsystem
    source: S,

    /// Reference to the baseline capture run
    baseline_ref: String,

    /// Reference to the snapshot capture run
    snapshot_ref: String,

    /// Memoized has-difference answers for this session
    cache: DiffStatusCache,

    /// Cooperative cancellation flag, checked between commands
    cancelled: Arc<AtomicBool>,
}

impl<S: OutputSource> ComparisonSession<S> {
    /// Create a session for one baseline/snapshot pairing
    pub fn new(
        source: S,
        baseline_ref: impl Into<String>,
        snapshot_ref: impl Into<String>,
    ) -> Self {
        Self {
            source,
            baseline_ref: baseline_ref.into(),
            snapshot_ref: snapshot_ref.into(),
            cache: DiffStatusCache::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle the caller can use to cancel in-flight batches
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Request cancellation of in-flight and future batch work
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Compute the has-difference status for a batch of commands.
    ///
    /// Commands are processed independently and in parallel; a resolution
    /// failure for one command yields [`CommandStatus::Unresolved`] for that
    /// command without aborting the rest. Cancellation stops the batch with
    /// [`CompareError::Cancelled`] and no partial result escapes.
    pub fn compute_batch_status(
        &self,
        commands: &[String],
    ) -> Result<BTreeMap<String, CommandStatus>, CompareError> {
        log::debug!(
            "computing status for {} commands ({} vs {})",
            commands.len(),
            self.baseline_ref,
            self.snapshot_ref
        );

        commands
            .par_iter()
            .map(|command| {
                if self.is_cancelled() {
                    return Err(CompareError::Cancelled);
                }

                Ok((command.clone(), self.command_status(command)))
            })
            .collect()
    }

    /// Compute the status for one command, consulting the cache
    fn command_status(&self, command: &str) -> CommandStatus {
        match self
            .source
            .resolve(&self.baseline_ref, &self.snapshot_ref, command)
        {
            Ok(Some(data)) => {
                let changed = self.cache.get_or_insert_with(
                    &data.baseline.id,
                    &data.snapshot.id,
                    command,
                    || has_difference(&data),
                );

                if changed {
                    CommandStatus::Changed
                } else {
                    CommandStatus::Unchanged
                }
            }
            Ok(None) => {
                // Missing data memoizes as "no difference" under the run
                // references, but is reported distinctly as Unresolved
                self.cache.get_or_insert_with(
                    &self.baseline_ref,
                    &self.snapshot_ref,
                    command,
                    || false,
                );

                CommandStatus::Unresolved
            }
            Err(err) => {
                log::warn!("failed to resolve '{}': {:#}", command, err);
                CommandStatus::Unresolved
            }
        }
    }

    /// Compute the full comparison result for one command.
    ///
    /// Always recomputed; only the boolean status is cached. Missing data
    /// surfaces as [`CompareError::DataNotFound`].
    pub fn compute_full_diff(&self, command: &str) -> Result<ComparisonResult, CompareError> {
        let data = self
            .source
            .resolve(&self.baseline_ref, &self.snapshot_ref, command)?
            .ok_or_else(|| CompareError::DataNotFound {
                command: command.to_string(),
            })?;

        let positional = TextDiff::diff(
            &data.baseline.normalized_text,
            &data.snapshot.normalized_text,
        );
        let text_diff = positional.render();

        let structured = if data.structured_supported {
            data.structured
                .as_ref()
                .map(|pair| compare_record_sets(&pair.baseline, &pair.snapshot))
        } else {
            None
        };

        let identical = match &structured {
            Some(diff) => !diff.has_changes(),
            None => positional.is_identical(),
        };

        Ok(ComparisonResult {
            identical,
            text_diff,
            structured,
        })
    }

    /// Get the session's status cache
    pub fn cache(&self) -> &DiffStatusCache {
        &self.cache
    }
}

/// Decide whether one command's data differs between baseline and snapshot.
///
/// Prefers the structured records when the source delivered them; otherwise
/// exact string inequality of the normalized text. Never runs the full text
/// differ for this boolean-only question.
fn has_difference(data: &CommandData) -> bool {
    if data.structured_supported {
        if let Some(pair) = &data.structured {
            return compare_record_sets(&pair.baseline, &pair.snapshot).has_changes();
        }
    }

    data.baseline.normalized_text != data.snapshot.normalized_text
}
