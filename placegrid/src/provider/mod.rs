//! Places-search provider abstraction
//!
//! This module provides traits and implementations for querying a
//! "search nearby circular region" places API.
//!
//! The [`HttpClient`] trait isolates transport so providers can be tested
//! against mock clients, and the [`PlacesProvider`] trait isolates the whole
//! provider so the area search can be tested without any HTTP at all.

mod google;
mod http;
mod types;

pub use google::{GooglePlacesProvider, SEARCH_NEARBY_URL};
pub use http::{HttpClient, ReqwestClient};
pub use types::{PlaceRecord, PlacesProvider, ProviderError, PAGE_RESULT_CAP};

#[cfg(test)]
pub use http::tests::{MockHttpClient, RecordedRequest};
