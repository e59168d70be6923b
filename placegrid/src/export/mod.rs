//! Result exporters
//!
//! Two narrow collaborators sit behind the search pipeline: a CSV table of
//! the deduplicated, flattened place records and an HTML coverage map of the
//! rectangles the traversal queried. Unlike provider queries, export
//! failures are fatal and propagate to the caller.

mod csv;
mod flatten;
mod map;

pub use self::csv::write_csv;
pub use flatten::flatten_record;
pub use map::{write_coverage_map, ColorRamp};

use thiserror::Error;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to write an export file
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] ::csv::Error),
}
