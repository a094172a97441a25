//! Streaming set-intersection statistics between two key streams.
//!
//! Two producers feed bounded queues of keys, two reducers concurrently fold
//! each queue into a frequency map, and a final reconciliation computes the
//! distinct and multiplicity-bounded overlap of the two maps.

pub mod config;
pub mod error;
pub mod intersect;
pub mod overlap;
pub mod pipeline;
pub mod queue;
pub mod reducer;
pub mod source;
pub mod types;

pub use config::IntersectConfig;
pub use error::{IntersectError, Result};
pub use intersect::compute_intersection;
pub use overlap::compute_overlap;
pub use pipeline::{SourceProgress, intersect_files, intersect_files_with_progress};
pub use queue::{KeyReceiver, KeySender};
pub use reducer::reduce;
pub use source::{CsvKeySource, KeySource, spawn_source};
pub use types::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::IntersectConfig;
    pub use crate::error::{IntersectError, Result};
    pub use crate::intersect::compute_intersection;
    pub use crate::queue::{self, KeyReceiver, KeySender};
    pub use crate::source::{CsvKeySource, KeySource, spawn_source};
    pub use crate::types::*;
}
