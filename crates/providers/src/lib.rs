mod config;
mod gemini;
mod hotels;
mod images;

use roam_core::ProviderError;

pub use config::{
    parse_base_url, ConfiguredBackends, GeminiConfig, HotelSearchConfig, ProviderConfig, Secret,
    UnsplashConfig, DEFAULT_GEMINI_MODEL,
};
pub use gemini::GeminiClient;
pub use hotels::MakcorpsHotelClient;
pub use images::{UnsplashImageClient, MAX_IMAGES};

/// The three production clients sharing one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct ProviderSet {
    pub generator: GeminiClient,
    pub hotels: MakcorpsHotelClient,
    pub images: UnsplashImageClient,
}

impl ProviderSet {
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let http = config.build_http_client()?;
        Ok(Self {
            generator: GeminiClient::new(http.clone(), config.gemini.clone()),
            hotels: MakcorpsHotelClient::new(http.clone(), config.hotels.clone()),
            images: UnsplashImageClient::new(http, config.images.clone()),
        })
    }
}

// Query strings carry credentials, so the url is dropped from error text.
pub(crate) fn transport_error(service: &'static str, error: reqwest::Error) -> ProviderError {
    ProviderError::Transport {
        service,
        message: error.without_url().to_string(),
    }
}
