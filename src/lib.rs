//! # avemlist
//!
//! Condenses a tracked Insight3 molecule list into an averaged list with one
//! record per track.
//!
//! ## Modules
//!
//! - [`util`] - Error handling
//! - [`i3`] - Insight3 binary layout, record store and output stream
//! - [`average`] - Track traversal and weighted averaging
//!
//! ## Example
//!
//! ```ignore
//! let summary = avemlist::run_aggregation("tracked.bin", "averaged.bin")?;
//! println!("{} tracks", summary.tracks);
//! ```

pub mod util;
pub mod i3;
pub mod average;

// Re-export commonly used types
pub use util::{Error, Result};
pub use average::{
    aggregate_store, aggregate_track, run_aggregation, run_aggregation_with,
    AggregateOptions, AggregationSummary, FieldPolicy, PolicyTable,
};

/// Build date stamped at compile time.
pub fn build_date() -> &'static str {
    option_env!("AVEMLIST_BUILD_DATE").unwrap_or("unknown")
}
