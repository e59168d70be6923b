//! PlaceGrid - Adaptive area search for a places API
//!
//! This library queries a "search nearby circular region" places API over a
//! rectangular geographic region, recursively subdividing the region so that
//! every query respects the provider's radius and result-count limits. Results
//! are deduplicated and can be exported to CSV and to an HTML coverage map.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides the full pipeline:
//!
//! ```ignore
//! use placegrid::geo::Rectangle;
//! use placegrid::pacing::FixedDelayPacer;
//! use placegrid::provider::{GooglePlacesProvider, ReqwestClient};
//! use placegrid::service::{search_places, SearchJob};
//!
//! let client = ReqwestClient::new()?;
//! let provider = GooglePlacesProvider::new(client, FixedDelayPacer::default(), api_key);
//!
//! let region = Rectangle::new(40.48, -74.28, 40.92, -73.68);
//! let mut job = SearchJob::new(region, vec!["lodging".to_string()]);
//! job.csv_path = Some("places.csv".into());
//!
//! let outcome = search_places(&provider, &job)?;
//! println!("{} unique places", outcome.places.len());
//! ```

pub mod config;
pub mod export;
pub mod geo;
pub mod logging;
pub mod pacing;
pub mod provider;
pub mod results;
pub mod search;
pub mod service;

/// Version of the PlaceGrid library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
