use std::future::Future;

use thiserror::Error;

use crate::models::{HotelClass, HotelRecord};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{service} is not configured")]
    NotConfigured { service: &'static str },
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },
    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// Generative-text backend. `Ok(None)` means the backend answered without usable text.
pub trait ItineraryGenerator: Send + Sync {
    fn generate_plan(
        &self,
        budget: f64,
        destination: &str,
        travelers: u32,
        origin: &str,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;

    fn suggest_destination(
        &self,
        budget: f64,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;
}

/// Hotel-search backend. Failures and empty results are indistinguishable.
pub trait HotelSearch: Send + Sync {
    fn search_hotels(
        &self,
        budget: f64,
        destination: &str,
        hotel_class: HotelClass,
    ) -> impl Future<Output = Vec<HotelRecord>> + Send;
}

/// Image-search backend. Returns at most two URLs.
pub trait ImageSearch: Send + Sync {
    fn search_images(&self, query: &str) -> impl Future<Output = Vec<String>> + Send;
}
