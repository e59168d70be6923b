//! Integration tests for the full search pipeline.
//!
//! These tests drive `service::search_places` against a deterministic mock
//! provider and verify the traversal-level properties:
//! - Oversized rectangles are never queried directly (radius trigger)
//! - Page-capped leaves are subdivided and merged (density trigger)
//! - The search log contains one entry per leaf, in depth-first order
//! - Identical runs produce identical output and logs
//!
//! Run with: `cargo test --test search_integration`

use std::cell::RefCell;

use placegrid::geo::Rectangle;
use placegrid::provider::{PlaceRecord, PlacesProvider, PAGE_RESULT_CAP};
use placegrid::search::MAX_SEARCH_RADIUS_KM;
use placegrid::service::{search_places, SearchJob};

// ============================================================================
// Mock Implementations
// ============================================================================

/// Radius below which a hotspot query stops being page-capped, in meters.
const SPARSE_RADIUS_M: f64 = 3000.0;

/// Deterministic mock provider.
///
/// Responses are a pure function of the query circle: centers inside the
/// hotspot box return exactly the page cap until the circle shrinks under
/// [`SPARSE_RADIUS_M`], everything else returns a handful of places. Every
/// response also contains one globally shared place so deduplication across
/// overlapping leaves is exercised. Queries are recorded for inspection.
struct GriddedProvider {
    hotspot: Rectangle,
    queries: RefCell<Vec<(f64, f64, f64)>>,
}

impl GriddedProvider {
    fn new(hotspot: Rectangle) -> Self {
        Self {
            hotspot,
            queries: RefCell::new(Vec::new()),
        }
    }

    fn in_hotspot(&self, lat: f64, lon: f64) -> bool {
        lat >= self.hotspot.sw_lat
            && lat <= self.hotspot.ne_lat
            && lon >= self.hotspot.sw_lon
            && lon <= self.hotspot.ne_lon
    }

    fn expected_count(&self, lat: f64, lon: f64, radius_m: f64) -> usize {
        if self.in_hotspot(lat, lon) && radius_m > SPARSE_RADIUS_M {
            PAGE_RESULT_CAP
        } else {
            5
        }
    }
}

fn place(id: String, visit: usize) -> PlaceRecord {
    let value = serde_json::json!({"id": id, "visit": visit});
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

impl PlacesProvider for GriddedProvider {
    fn search_nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
        _included_types: &[String],
    ) -> Vec<PlaceRecord> {
        let mut queries = self.queries.borrow_mut();
        queries.push((lat, lon, radius_m));
        let visit = queries.len();

        let count = self.expected_count(lat, lon, radius_m);
        let mut places: Vec<PlaceRecord> = (1..count)
            .map(|i| place(format!("p-{:.5}-{:.5}-{}", lat, lon, i), visit))
            .collect();
        // The same well-known place shows up in every overlapping circle
        places.push(place("shared-central".to_string(), visit));
        places
    }

    fn name(&self) -> &str {
        "gridded-mock"
    }
}

fn job(region: Rectangle) -> SearchJob {
    SearchJob::new(region, vec!["lodging".to_string()])
}

/// 0.3°×0.3° region at the equator: a 3×3 grid of 0.1° cells, each one a
/// direct leaf (diagonal ≈ 15.7 km).
fn test_region() -> Rectangle {
    Rectangle::new(0.0, 0.0, 0.3, 0.3)
}

/// The central grid cell is the dense hotspot.
fn hotspot() -> Rectangle {
    Rectangle::new(0.1, 0.1, 0.2, 0.2)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_every_query_respects_radius_limit() {
    // A large region forces radius subdivision before any query is issued:
    // 4°×4° at 3 divisions gives 1.33° grid cells (approx radius ~92 km),
    // each of which must split once more before it fits under the limit
    let provider = GriddedProvider::new(Rectangle::new(99.0, 99.0, 99.0, 99.0));
    let region = Rectangle::new(40.0, -74.0, 44.0, -70.0);

    let outcome = search_places(&provider, &job(region)).unwrap();

    let queries = provider.queries.borrow();
    assert_eq!(queries.len(), 36, "each of the 9 grid cells splits into 4");
    for (_, _, radius_m) in queries.iter() {
        assert!(
            *radius_m <= MAX_SEARCH_RADIUS_KM * 1000.0,
            "query radius {} exceeds the provider limit",
            radius_m
        );
    }
    // One log entry per query, none for the subdivided parents
    assert_eq!(outcome.log.len(), queries.len());
}

#[test]
fn test_density_trigger_drills_into_hotspot() {
    let provider = GriddedProvider::new(hotspot());

    let outcome = search_places(&provider, &job(test_region())).unwrap();

    // 9 grid leaves, plus the hotspot cell's 4 sub-leaves (radius ~4.3 km,
    // still dense), plus their 16 sub-leaves (radius ~2.2 km, sparse)
    assert_eq!(outcome.log.len(), 9 + 4 + 16);

    let capped: Vec<_> = outcome
        .log
        .records()
        .iter()
        .filter(|r| r.result_count == PAGE_RESULT_CAP)
        .collect();
    assert_eq!(capped.len(), 5, "hotspot leaf and its four dense children");
    for record in capped {
        assert!(record.subdivided, "page-capped leaves must subdivide");
    }
}

#[test]
fn test_log_matches_provider_observations() {
    let provider = GriddedProvider::new(hotspot());

    let outcome = search_places(&provider, &job(test_region())).unwrap();

    let queries = provider.queries.borrow();
    assert_eq!(outcome.log.len(), queries.len());
    for (record, (lat, lon, radius_m)) in outcome.log.records().iter().zip(queries.iter()) {
        // The log preserves visitation order, so entry N describes query N
        let (center_lat, center_lon) = record.bounds.center();
        assert!((center_lat - lat).abs() < 1e-9);
        assert!((center_lon - lon).abs() < 1e-9);
        assert_eq!(
            record.result_count,
            provider.expected_count(*lat, *lon, *radius_m)
        );
    }
}

#[test]
fn test_results_are_deduplicated() {
    let provider = GriddedProvider::new(hotspot());

    let outcome = search_places(&provider, &job(test_region())).unwrap();

    let mut ids: Vec<&str> = outcome
        .places
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "duplicate ids survived deduplication");

    // The shared place appears once, positioned at its first sighting but
    // carrying the value of its last sighting
    let shared: Vec<&PlaceRecord> = outcome
        .places
        .iter()
        .filter(|p| p["id"] == "shared-central")
        .collect();
    assert_eq!(shared.len(), 1);
    let last_visit = provider.queries.borrow().len();
    assert_eq!(shared[0]["visit"], last_visit);
    // First sighting was the very first leaf's batch of five
    assert!(outcome.places[..5]
        .iter()
        .any(|p| p["id"] == "shared-central"));
}

#[test]
fn test_identical_runs_are_identical() {
    let provider = GriddedProvider::new(hotspot());

    let first = search_places(&provider, &job(test_region())).unwrap();
    let second = search_places(&provider, &job(test_region())).unwrap();

    let first_ids: Vec<String> = first
        .places
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    let second_ids: Vec<String> = second
        .places
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(first_ids, second_ids);
    assert_eq!(first.log, second.log);
}
