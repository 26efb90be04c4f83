use derive_more::Display;
use ropey::Rope;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the status of one line position in a positional diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffLineStatus {
    /// The line is identical at this position in both versions
    #[display(fmt = "Unchanged")]
    Unchanged,

    /// The line differs at this position (including one side missing)
    #[display(fmt = "Changed")]
    Changed,
}

/// One position in a positional diff, holding both sides of the line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffLine {
    /// The status of this position
    pub status: DiffLineStatus,

    /// The baseline line at this index, empty if past the end of the baseline
    pub baseline: String,

    /// The snapshot line at this index, empty if past the end of the snapshot
    pub snapshot: String,
}

impl DiffLine {
    /// Check if this position carries a change
    pub fn is_changed(&self) -> bool {
        self.status == DiffLineStatus::Changed
    }
}

/// A positional line diff between a baseline and a snapshot text.
///
/// Lines are compared strictly by index: position `i` of the baseline against
/// position `i` of the snapshot, with a missing line treated as empty. There
/// is no realignment after insertions or deletions, so a single inserted line
/// shifts every subsequent position to changed. That trade-off keeps the diff
/// O(n) and is relied upon by callers; [`crate::TextDiff::unified_diff`] is
/// the place to go for a Myers-aligned view.
#[derive(Debug, Clone)]
pub struct PositionalDiff {
    /// The baseline version of the text
    baseline_text: Rope,

    /// The snapshot version of the text
    snapshot_text: Rope,

    /// The classified line positions
    lines: Vec<DiffLine>,
}

impl PositionalDiff {
    /// Create a new positional diff between two texts
    pub fn new(baseline: &str, snapshot: &str) -> Self {
        let lines = Self::compute_lines(baseline, snapshot);

        Self {
            baseline_text: Rope::from_str(baseline),
            snapshot_text: Rope::from_str(snapshot),
            lines,
        }
    }

    /// Walk both texts index by index and classify each position
    fn compute_lines(baseline: &str, snapshot: &str) -> Vec<DiffLine> {
        let baseline_lines = split_lines(baseline);
        let snapshot_lines = split_lines(snapshot);
        let count = baseline_lines.len().max(snapshot_lines.len());

        let mut lines = Vec::with_capacity(count);

        for i in 0..count {
            let baseline_line = baseline_lines.get(i).cloned().unwrap_or_default();
            let snapshot_line = snapshot_lines.get(i).cloned().unwrap_or_default();

            let status = if baseline_line == snapshot_line {
                DiffLineStatus::Unchanged
            } else {
                DiffLineStatus::Changed
            };

            lines.push(DiffLine {
                status,
                baseline: baseline_line,
                snapshot: snapshot_line,
            });
        }

        lines
    }

    /// Get the classified line positions
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Get a line position by index
    pub fn line(&self, index: usize) -> Option<&DiffLine> {
        self.lines.get(index)
    }

    /// Get the number of compared positions
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the number of changed positions
    pub fn changed_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.is_changed()).count()
    }

    /// Get the number of unchanged positions
    pub fn unchanged_lines(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_changed()).count()
    }

    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|l| l.is_changed())
    }

    /// Check if the two texts are identical
    pub fn is_identical(&self) -> bool {
        !self.has_changes()
    }

    /// Get the baseline text
    pub fn baseline_text(&self) -> &Rope {
        &self.baseline_text
    }

    /// Get the snapshot text
    pub fn snapshot_text(&self) -> &Rope {
        &self.snapshot_text
    }

    /// Render the diff as prefixed text.
    ///
    /// Unchanged positions render as `"  line"`. A changed position renders
    /// its baseline side as `"- line"` and its snapshot side as `"+ line"`,
    /// omitting a side that is empty. Two empty inputs render as an empty
    /// string.
    pub fn render(&self) -> String {
        let mut out = Vec::new();

        for line in &self.lines {
            match line.status {
                DiffLineStatus::Unchanged => {
                    out.push(format!("  {}", line.baseline));
                }
                DiffLineStatus::Changed => {
                    if !line.baseline.is_empty() {
                        out.push(format!("- {}", line.baseline));
                    }
                    if !line.snapshot.is_empty() {
                        out.push(format!("+ {}", line.snapshot));
                    }
                }
            }
        }

        out.join("\n")
    }
}

/// Split on newlines without producing a trailing empty line
fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    if text.ends_with('\n') {
        lines.pop();
    }

    lines
}
