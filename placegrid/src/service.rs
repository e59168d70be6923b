//! High-level search orchestration
//!
//! Wires the pieces together: initial grid subdivision, recursive search of
//! every cell, concatenation, deduplication and the optional CSV and
//! coverage-map exports.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::export::{self, ExportError};
use crate::geo::{self, Rectangle};
use crate::provider::{PlaceRecord, PlacesProvider};
use crate::results::dedupe_by_id;
use crate::search::{AreaSearch, SearchLog, DEFAULT_MAX_DENSITY_DEPTH};

/// Default initial grid divisions per axis.
pub const DEFAULT_DIVISIONS: u32 = 3;

/// Errors surfaced by a search session.
///
/// Provider failures are fail-soft inside the traversal, so only export
/// failures can abort a session.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Export failed
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// One area-search request.
#[derive(Debug, Clone)]
pub struct SearchJob {
    /// Region to cover
    pub region: Rectangle,
    /// Place type filters (e.g. `"lodging"`)
    pub included_types: Vec<String>,
    /// CSV output path; skipped when `None`
    pub csv_path: Option<PathBuf>,
    /// Coverage map output path; skipped when `None`
    pub map_path: Option<PathBuf>,
    /// Initial grid divisions per axis
    pub divisions: u32,
    /// Density-subdivision depth guard
    pub max_density_depth: usize,
}

impl SearchJob {
    /// Creates a job with default divisions, depth guard and no exports.
    pub fn new(region: Rectangle, included_types: Vec<String>) -> Self {
        Self {
            region,
            included_types,
            csv_path: None,
            map_path: None,
            divisions: DEFAULT_DIVISIONS,
            max_density_depth: DEFAULT_MAX_DENSITY_DEPTH,
        }
    }
}

/// Result of one search session.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Deduplicated place records
    pub places: Vec<PlaceRecord>,
    /// One record per leaf query, in visitation order
    pub log: SearchLog,
}

/// Runs a full area search.
///
/// Subdivides the job's region into `divisions²` cells, searches each cell
/// recursively (labels `"1"` through `"n²"`), concatenates the results,
/// deduplicates them by place id, and writes the requested exports.
///
/// # Errors
///
/// Only export failures abort a session; failed leaf queries degrade to
/// empty results inside the traversal.
pub fn search_places<P: PlacesProvider>(
    provider: &P,
    job: &SearchJob,
) -> Result<SearchOutcome, ServiceError> {
    info!(
        provider = provider.name(),
        region = %job.region,
        divisions = job.divisions,
        "starting comprehensive search"
    );

    let mut log = SearchLog::new();
    let searcher = AreaSearch::new(provider).with_max_density_depth(job.max_density_depth);

    let mut all_results: Vec<PlaceRecord> = Vec::new();
    for (i, cell) in geo::subdivide(&job.region, job.divisions).into_iter().enumerate() {
        let label = (i + 1).to_string();
        info!(label = %label, "searching initial rectangle");
        all_results.extend(searcher.search(cell, &job.included_types, &label, &mut log));
    }

    let total = all_results.len();
    let places = dedupe_by_id(all_results);
    info!(
        total = total,
        unique = places.len(),
        leaves = log.len(),
        "search complete"
    );

    if let Some(path) = &job.csv_path {
        export::write_csv(path, &places)?;
    }
    if let Some(path) = &job.map_path {
        export::write_coverage_map(path, &job.region, &log)?;
    }

    Ok(SearchOutcome { places, log })
}
