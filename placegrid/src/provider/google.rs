//! Google Places "Search Nearby" provider.
//!
//! Uses the Places API (New) searchNearby endpoint. Requires users to have
//! their own Google Cloud Platform account and an API key with the Places
//! API enabled.
//!
//! # API Endpoint
//!
//! - `https://places.googleapis.com/v1/places:searchNearby`
//!
//! # Pagination
//!
//! The endpoint caps every response at [`PAGE_RESULT_CAP`] places and hands
//! out a `nextPageToken` when more are available. Tokens are not valid
//! immediately, so the provider pauses via its [`Pacer`] before each
//! continuation request. At most two continuation pages are fetched per
//! query, matching the provider-side limit of 60 results per search.
//!
//! # Error Policy
//!
//! Queries are fail-soft: any transport, HTTP or decode error at any page is
//! logged and converted into an empty result set, so one failed leaf cannot
//! abort a whole area traversal.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::pacing::Pacer;
use crate::provider::{HttpClient, PlaceRecord, PlacesProvider, ProviderError, PAGE_RESULT_CAP};

/// Search Nearby endpoint URL.
pub const SEARCH_NEARBY_URL: &str = "https://places.googleapis.com/v1/places:searchNearby";

/// Maximum number of continuation pages fetched after the initial request.
const EXTRA_PAGE_FETCHES: usize = 2;

/// One page of the searchNearby response.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchNearbyResponse {
    places: Vec<PlaceRecord>,
    next_page_token: Option<String>,
}

/// Google Places search provider.
///
/// Generic over the HTTP client and the pacer so both can be mocked in tests.
///
/// # Example
///
/// ```no_run
/// use placegrid::pacing::FixedDelayPacer;
/// use placegrid::provider::{GooglePlacesProvider, ReqwestClient};
///
/// let client = ReqwestClient::new().unwrap();
/// let provider =
///     GooglePlacesProvider::new(client, FixedDelayPacer::default(), "YOUR_API_KEY".to_string());
/// ```
pub struct GooglePlacesProvider<C: HttpClient, P: Pacer> {
    http_client: C,
    pacer: P,
    api_key: String,
}

impl<C: HttpClient, P: Pacer> GooglePlacesProvider<C, P> {
    /// Creates a new provider with the given API key.
    pub fn new(http_client: C, pacer: P, api_key: String) -> Self {
        Self {
            http_client,
            pacer,
            api_key,
        }
    }

    /// Builds the JSON payload for one searchNearby page request.
    fn build_payload(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
        included_types: &[String],
        page_token: Option<&str>,
    ) -> String {
        let mut payload = serde_json::json!({
            "includedTypes": included_types,
            "maxResultCount": PAGE_RESULT_CAP,
            "locationRestriction": {
                "circle": {
                    "center": {
                        "latitude": lat,
                        "longitude": lon
                    },
                    "radius": radius_m
                }
            }
        });

        if let Some(token) = page_token {
            payload["pageToken"] = serde_json::Value::String(token.to_string());
        }

        payload.to_string()
    }

    /// Issues one page request and decodes the response.
    fn fetch_page(&self, body: &str) -> Result<SearchNearbyResponse, ProviderError> {
        let headers = [
            ("X-Goog-Api-Key", self.api_key.as_str()),
            ("X-Goog-FieldMask", "*"),
        ];
        let raw = self
            .http_client
            .post_json(SEARCH_NEARBY_URL, &headers, body)?;

        serde_json::from_slice(&raw)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to decode page: {}", e)))
    }

    /// Retrieves all result pages for one circle query.
    fn fetch_all_pages(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
        included_types: &[String],
    ) -> Result<Vec<PlaceRecord>, ProviderError> {
        let body = self.build_payload(lat, lon, radius_m, included_types, None);
        let mut page = self.fetch_page(&body)?;
        let mut results = page.places;

        for _ in 0..EXTRA_PAGE_FETCHES {
            let Some(token) = page.next_page_token else {
                break;
            };
            // The continuation token needs a moment before it becomes valid
            self.pacer.pause();

            let body = self.build_payload(lat, lon, radius_m, included_types, Some(&token));
            page = self.fetch_page(&body)?;
            results.append(&mut page.places);
        }

        Ok(results)
    }
}

impl<C: HttpClient, P: Pacer> PlacesProvider for GooglePlacesProvider<C, P> {
    fn search_nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
        included_types: &[String],
    ) -> Vec<PlaceRecord> {
        match self.fetch_all_pages(lat, lon, radius_m, included_types) {
            Ok(results) => {
                debug!(
                    lat = lat,
                    lon = lon,
                    radius_m = radius_m,
                    count = results.len(),
                    "searchNearby query complete"
                );
                results
            }
            Err(e) => {
                warn!(
                    lat = lat,
                    lon = lon,
                    radius_m = radius_m,
                    error = %e,
                    "searchNearby query failed; treating leaf as empty"
                );
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        "Google Places"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::NoopPacer;
    use crate::provider::MockHttpClient;
    use std::cell::Cell;

    /// Pacer that counts how often it was asked to pause.
    #[derive(Default)]
    struct CountingPacer {
        pauses: Cell<usize>,
    }

    impl Pacer for &CountingPacer {
        fn pause(&self) {
            self.pauses.set(self.pauses.get() + 1);
        }
    }

    fn page_json(ids: &[&str], next_token: Option<&str>) -> Vec<u8> {
        let places: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| serde_json::json!({"id": id, "displayName": {"text": id}}))
            .collect();
        let mut response = serde_json::json!({ "places": places });
        if let Some(token) = next_token {
            response["nextPageToken"] = serde_json::Value::String(token.to_string());
        }
        response.to_string().into_bytes()
    }

    fn types() -> Vec<String> {
        vec!["lodging".to_string()]
    }

    #[test]
    fn test_provider_name() {
        let mock = MockHttpClient::new(vec![]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());
        assert_eq!(provider.name(), "Google Places");
    }

    #[test]
    fn test_single_page_query() {
        let mock = MockHttpClient::new(vec![Ok(page_json(&["a", "b"], None))]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], "a");
        assert_eq!(provider.http_client.requests.borrow().len(), 1);
    }

    #[test]
    fn test_payload_shape() {
        let mock = MockHttpClient::new(vec![Ok(page_json(&[], None))]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let _ = provider.search_nearby(40.5, -74.0, 1234.5, &types());

        let requests = provider.http_client.requests.borrow();
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["includedTypes"][0], "lodging");
        assert_eq!(body["maxResultCount"], 20);
        assert_eq!(
            body["locationRestriction"]["circle"]["center"]["latitude"],
            40.5
        );
        assert_eq!(body["locationRestriction"]["circle"]["radius"], 1234.5);
        assert!(body.get("pageToken").is_none());
        assert_eq!(requests[0].url, SEARCH_NEARBY_URL);
    }

    #[test]
    fn test_pagination_follows_tokens() {
        let mock = MockHttpClient::new(vec![
            Ok(page_json(&["a"], Some("token-1"))),
            Ok(page_json(&["b"], Some("token-2"))),
            Ok(page_json(&["c"], None)),
        ]);
        let pacer = CountingPacer::default();
        let provider = GooglePlacesProvider::new(mock, &pacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());

        assert_eq!(results.len(), 3);
        // One pause before each continuation request
        assert_eq!(pacer.pauses.get(), 2);

        let requests = provider.http_client.requests.borrow();
        assert_eq!(requests.len(), 3);
        let second: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
        assert_eq!(second["pageToken"], "token-1");
        let third: serde_json::Value = serde_json::from_str(&requests[2].body).unwrap();
        assert_eq!(third["pageToken"], "token-2");
    }

    #[test]
    fn test_pagination_stops_after_two_extra_pages() {
        // Every page advertises another token, but only two continuations
        // may be fetched
        let mock = MockHttpClient::new(vec![
            Ok(page_json(&["a"], Some("t1"))),
            Ok(page_json(&["b"], Some("t2"))),
            Ok(page_json(&["c"], Some("t3"))),
            Ok(page_json(&["d"], None)),
        ]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());

        assert_eq!(results.len(), 3);
        assert_eq!(provider.http_client.requests.borrow().len(), 3);
    }

    #[test]
    fn test_http_error_is_fail_soft() {
        let mock = MockHttpClient::new(vec![Err(ProviderError::HttpError(
            "HTTP 403 from POST".to_string(),
        ))]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());
        assert!(results.is_empty());
    }

    #[test]
    fn test_error_on_continuation_drops_whole_leaf() {
        let mock = MockHttpClient::new(vec![
            Ok(page_json(&["a"], Some("token-1"))),
            Err(ProviderError::HttpError("HTTP 500".to_string())),
        ]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_response_is_fail_soft() {
        let mock = MockHttpClient::new(vec![Ok(b"not json".to_vec())]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());
        assert!(results.is_empty());
    }

    #[test]
    fn test_response_without_places_field_is_empty() {
        let mock = MockHttpClient::new(vec![Ok(b"{}".to_vec())]);
        let provider = GooglePlacesProvider::new(mock, NoopPacer, "key".to_string());

        let results = provider.search_nearby(40.5, -74.0, 1000.0, &types());
        assert!(results.is_empty());
    }
}
