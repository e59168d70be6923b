//! Recursive area search
//!
//! The core traversal: a rectangle is queried directly when it fits inside
//! the provider's maximum search radius, and subdivided into a 2×2 grid
//! otherwise. A leaf whose result count hits the provider's page cap is
//! assumed to hide unseen results and is subdivided as well, so dense areas
//! are drilled into until every place is surfaced.
//!
//! Every leaf query appends one [`SearchRecord`] to the session's
//! [`SearchLog`], which the coverage-map export later renders.

mod types;

pub use types::{SearchLog, SearchRecord};

use tracing::{debug, info, warn};

use crate::geo::{self, Rectangle};
use crate::provider::{PlaceRecord, PlacesProvider, PAGE_RESULT_CAP};

/// Maximum radius the provider supports for one query, in kilometers.
///
/// Held a little under the documented 50 km limit.
pub const MAX_SEARCH_RADIUS_KM: f64 = 49.0;

/// Pad applied to the approximate radius before querying.
///
/// The midpoint/half-diagonal approximation undershoots near the rectangle
/// corners, so leaf queries widen the circle by 10%.
pub const RADIUS_PAD_FACTOR: f64 = 1.1;

/// Default cap on density-triggered subdivision depth.
pub const DEFAULT_MAX_DENSITY_DEPTH: usize = 8;

/// Recursive area searcher over one [`PlacesProvider`].
pub struct AreaSearch<'a, P: PlacesProvider> {
    provider: &'a P,
    max_density_depth: usize,
}

impl<'a, P: PlacesProvider> AreaSearch<'a, P> {
    /// Creates a searcher with the default density depth guard.
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            max_density_depth: DEFAULT_MAX_DENSITY_DEPTH,
        }
    }

    /// Overrides the density-subdivision depth guard.
    pub fn with_max_density_depth(mut self, max_density_depth: usize) -> Self {
        self.max_density_depth = max_density_depth;
        self
    }

    /// Searches a rectangle, subdividing as needed.
    ///
    /// # Arguments
    ///
    /// * `rect` - Region to cover
    /// * `included_types` - Place type filters passed to the provider
    /// * `label` - Human-readable cell label used in logs (e.g. `"3"`,
    ///   `"3.2"`, `"3.2.a"`)
    /// * `log` - Accumulator receiving one record per leaf query
    ///
    /// # Returns
    ///
    /// All place records gathered from this rectangle and its subdivisions,
    /// in depth-first visitation order. Duplicates across overlapping leaf
    /// circles are expected; callers deduplicate afterwards.
    pub fn search(
        &self,
        rect: Rectangle,
        included_types: &[String],
        label: &str,
        log: &mut SearchLog,
    ) -> Vec<PlaceRecord> {
        self.search_at_depth(rect, included_types, label, 0, log)
    }

    fn search_at_depth(
        &self,
        rect: Rectangle,
        included_types: &[String],
        label: &str,
        depth: usize,
        log: &mut SearchLog,
    ) -> Vec<PlaceRecord> {
        let (center_lat, center_lon, approx_radius) = geo::center_and_radius_km(&rect);

        // Radius-exceeded: the rectangle cannot be covered by one query
        if approx_radius > MAX_SEARCH_RADIUS_KM {
            debug!(
                label = label,
                approx_radius_km = approx_radius,
                "rectangle too large, subdividing for radius"
            );
            let mut all_results = Vec::new();
            for (i, sub_rect) in geo::subdivide(&rect, 2).into_iter().enumerate() {
                let sub_label = if label.is_empty() {
                    (i + 1).to_string()
                } else {
                    format!("{}.{}", label, i + 1)
                };
                all_results.extend(
                    self.search_at_depth(sub_rect, included_types, &sub_label, depth, log),
                );
            }
            return all_results;
        }

        // Leaf query over the rectangle's bounding circle
        let search_radius_m =
            (approx_radius * RADIUS_PAD_FACTOR * 1000.0).min(MAX_SEARCH_RADIUS_KM * 1000.0);
        info!(
            label = label,
            center_lat = center_lat,
            center_lon = center_lon,
            radius_m = search_radius_m,
            "querying leaf rectangle"
        );
        let results =
            self.provider
                .search_nearby(center_lat, center_lon, search_radius_m, included_types);
        let result_count = results.len();
        debug!(label = label, count = result_count, "leaf query complete");

        // A page-capped result set means the query may have been truncated
        let dense = result_count == PAGE_RESULT_CAP;
        let subdividing = dense && depth < self.max_density_depth;

        log.push(SearchRecord {
            bounds: rect,
            result_count,
            subdivided: subdividing,
        });

        if dense && !subdividing {
            warn!(
                label = label,
                depth = depth,
                "density trigger hit depth guard, keeping page-capped results"
            );
            return results;
        }

        if subdividing {
            info!(
                label = label,
                "maximum results reached in dense area, subdividing further"
            );
            let mut all_results = results;
            for (i, sub_rect) in geo::subdivide(&rect, 2).into_iter().enumerate() {
                let sub_label = format!("{}.{}", label, (b'a' + i as u8) as char);
                all_results.extend(self.search_at_depth(
                    sub_rect,
                    included_types,
                    &sub_label,
                    depth + 1,
                    log,
                ));
            }
            return all_results;
        }

        results
    }
}
