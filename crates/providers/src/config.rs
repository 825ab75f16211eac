use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use roam_core::ProviderError;
use url::Url;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_HOTEL_BASE_URL: &str = "https://api.makcorps.com/";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com/";

/// Credential that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<Secret>,
    pub model: String,
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct HotelSearchConfig {
    pub api_key: Option<Secret>,
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    pub access_key: Option<Secret>,
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub gemini: GeminiConfig,
    pub hotels: HotelSearchConfig,
    pub images: UnsplashConfig,
    /// Unset means the HTTP client default applies.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            gemini: GeminiConfig {
                api_key: secret_var("ROAM_GEMINI_API_KEY"),
                model: env::var("ROAM_GEMINI_MODEL")
                    .ok()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: base_url_var("ROAM_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)?,
            },
            hotels: HotelSearchConfig {
                api_key: secret_var("ROAM_HOTEL_API_KEY"),
                base_url: base_url_var("ROAM_HOTEL_BASE_URL", DEFAULT_HOTEL_BASE_URL)?,
            },
            images: UnsplashConfig {
                access_key: secret_var("ROAM_UNSPLASH_ACCESS_KEY"),
                base_url: base_url_var("ROAM_UNSPLASH_BASE_URL", DEFAULT_UNSPLASH_BASE_URL)?,
            },
            connect_timeout: seconds_var("ROAM_HTTP_CONNECT_TIMEOUT_SECONDS"),
            request_timeout: seconds_var("ROAM_HTTP_TIMEOUT_SECONDS"),
        })
    }

    pub fn build_http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("failed to build HTTP client")
    }

    pub fn configured_backends(&self) -> ConfiguredBackends {
        ConfiguredBackends {
            generator: self.gemini.api_key.is_some(),
            hotels: self.hotels.api_key.is_some(),
            images: self.images.access_key.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ConfiguredBackends {
    pub generator: bool,
    pub hotels: bool,
    pub images: bool,
}

pub fn parse_base_url(value: &str) -> Result<Url> {
    let trimmed = value.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).with_context(|| format!("invalid base url `{trimmed}`"))
}

pub(crate) fn endpoint(
    service: &'static str,
    base: &Url,
    path: &str,
) -> Result<Url, ProviderError> {
    base.join(path).map_err(|error| ProviderError::Transport {
        service,
        message: format!("invalid endpoint `{path}`: {error}"),
    })
}

fn secret_var(name: &str) -> Option<Secret> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(Secret::new)
}

fn base_url_var(name: &str, default: &str) -> Result<Url> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_base_url(&raw).with_context(|| format!("{name} is not a valid url"))
}

fn seconds_var(name: &str) -> Option<Duration> {
    env::var(name).ok().and_then(|value| parse_seconds(&value))
}

fn parse_seconds(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|seconds| *seconds > 0)
        .map(Duration::from_secs)
}
