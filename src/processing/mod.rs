/*!
 * Transformation engines for subtitle tracks.
 *
 * This module contains the two track transformations and the pipeline
 * that coordinates them. It is split into several submodules:
 *
 * - `merge`: Collapsing temporally close entries into one
 * - `split`: Breaking over-long entries into timed fragments
 * - `pipeline`: Mode dispatch, undo stack and debounced recompute
 */

use serde::{Deserialize, Serialize};

// Re-export main types for easier usage
pub use self::merge::merge_adjacent;
pub use self::split::{SplitMethod, split_long_entries};
pub use self::pipeline::{DebouncedProcessor, ProcessingParams, ProcessingPipeline};

// Submodules
pub mod merge;
pub mod pipeline;
pub mod split;

/// Which transformation the pipeline runs
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Merge temporally close entries
    #[default]
    Merge,
    /// Split over-long entries
    Split,
}

impl ProcessingMode {
    // @returns: Capitalized mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Merge => "Merge",
            Self::Split => "Split",
        }
    }
}
