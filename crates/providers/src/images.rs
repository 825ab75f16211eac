use reqwest::Client;
use roam_core::{ImageSearch, ProviderError};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::config::{endpoint, UnsplashConfig};
use crate::transport_error;

const SERVICE: &str = "image search";
pub const MAX_IMAGES: usize = 2;

#[derive(Debug, Deserialize)]
struct SearchPhotosResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: Option<PhotoUrls>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UnsplashImageClient {
    http: Client,
    config: UnsplashConfig,
}

impl UnsplashImageClient {
    pub fn new(http: Client, config: UnsplashConfig) -> Self {
        Self { http, config }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        let access_key = self
            .config
            .access_key
            .as_ref()
            .ok_or(ProviderError::NotConfigured { service: SERVICE })?;
        let url = endpoint(SERVICE, &self.config.base_url, "search/photos")?;

        let response = self
            .http
            .get(url)
            .query(&[
                ("query", query.to_string()),
                ("per_page", MAX_IMAGES.to_string()),
                ("client_id", access_key.expose().to_string()),
            ])
            .send()
            .await
            .map_err(|error| transport_error(SERVICE, error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body: SearchPhotosResponse =
            response
                .json()
                .await
                .map_err(|error| ProviderError::Decode {
                    service: SERVICE,
                    message: error.without_url().to_string(),
                })?;

        Ok(regular_urls(body))
    }
}

impl ImageSearch for UnsplashImageClient {
    #[instrument(skip(self))]
    async fn search_images(&self, query: &str) -> Vec<String> {
        self.fetch(query).await.unwrap_or_else(|error| {
            warn!(error = %error, "image search failed; showing no images");
            Vec::new()
        })
    }
}

fn regular_urls(body: SearchPhotosResponse) -> Vec<String> {
    body.results
        .into_iter()
        .filter_map(|photo| photo.urls?.regular)
        .take(MAX_IMAGES)
        .collect()
}
