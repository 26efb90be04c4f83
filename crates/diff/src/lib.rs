// Core comparison library for NetDrift
// This crate provides positional text diffs and structured record diffs

mod line_diff;
mod structured;
mod text_diff;

pub use line_diff::{DiffLine, DiffLineStatus, PositionalDiff};
pub use structured::{
    compare_record_sets, FieldDiff, ItemDiff, ItemStatus, RecordSet, RecordSetError,
    StructuredDiff,
};
pub use text_diff::TextDiff;
