//! Provider types and traits

use std::fmt;

/// Maximum number of results the provider returns per query page.
///
/// A leaf query that comes back with exactly this many results may be
/// truncated, which is what drives the density-exceeded subdivision.
pub const PAGE_RESULT_CAP: usize = 20;

/// A single place as returned by the search API.
///
/// Kept as the raw JSON object because the field set is large, sparsely
/// populated and provider-defined. Every record carries a unique string
/// `id` field used for deduplication.
pub type PlaceRecord = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Invalid response data from provider
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Trait for "search nearby circular region" place providers.
///
/// Implementations are fail-soft: a leaf query that errors logs the failure
/// and yields an empty result set instead of aborting the caller's traversal.
pub trait PlacesProvider {
    /// Searches for places within a circle.
    ///
    /// # Arguments
    ///
    /// * `lat`, `lon` - Circle center in decimal degrees
    /// * `radius_m` - Circle radius in meters
    /// * `included_types` - Place type filters (e.g. `"lodging"`)
    ///
    /// # Returns
    ///
    /// All place records the provider surfaced for the circle, across every
    /// result page. Empty on error.
    fn search_nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
        included_types: &[String],
    ) -> Vec<PlaceRecord>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}
