use similar::{Algorithm, ChangeTag, TextDiff as SimilarTextDiff};

use crate::line_diff::PositionalDiff;

/// Wrapper around text diff operations
pub struct TextDiff;

impl TextDiff {
    /// Create a positional diff between two texts.
    ///
    /// This is the authoritative comparison: deterministic, total, and
    /// strictly index-wise (see [`PositionalDiff`] for the semantics).
    pub fn diff(baseline: &str, snapshot: &str) -> PositionalDiff {
        PositionalDiff::new(baseline, snapshot)
    }

    /// Generate a unified diff string (like git diff).
    ///
    /// Uses the Myers algorithm, so inserted lines are realigned instead of
    /// cascading. This is an auxiliary view only; status computation and
    /// [`TextDiff::diff`] stay positional.
    pub fn unified_diff(baseline: &str, snapshot: &str) -> String {
        let diff = SimilarTextDiff::configure()
            .algorithm(Algorithm::Myers)
            .timeout(std::time::Duration::from_secs(5))
            .diff_lines(baseline, snapshot);

        let mut result = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            result.push_str(&format!("{}{}", sign, change));
        }

        result
    }
}
