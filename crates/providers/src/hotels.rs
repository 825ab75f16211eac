use reqwest::Client;
use roam_core::{HotelClass, HotelRecord, HotelSearch, ProviderError};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::{endpoint, HotelSearchConfig};
use crate::transport_error;

const SERVICE: &str = "hotel search";

#[derive(Debug, Deserialize)]
struct HotelSearchResponse {
    data: Option<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct MakcorpsHotelClient {
    http: Client,
    config: HotelSearchConfig,
}

impl MakcorpsHotelClient {
    pub fn new(http: Client, config: HotelSearchConfig) -> Self {
        Self { http, config }
    }

    async fn fetch(
        &self,
        budget: f64,
        destination: &str,
        hotel_class: HotelClass,
    ) -> Result<Vec<HotelRecord>, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(ProviderError::NotConfigured { service: SERVICE })?;
        let url = endpoint(SERVICE, &self.config.base_url, "v1/hotels")?;

        let response = self
            .http
            .get(url)
            .query(&[
                ("destination", destination.to_string()),
                ("hotel_type", hotel_class.as_wire().to_string()),
                ("budget", budget.to_string()),
                ("api_key", api_key.expose().to_string()),
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

        let body: HotelSearchResponse =
            response
                .json()
                .await
                .map_err(|error| ProviderError::Decode {
                    service: SERVICE,
                    message: error.without_url().to_string(),
                })?;

        Ok(parse_hotels(body.data.unwrap_or_default()))
    }
}

impl HotelSearch for MakcorpsHotelClient {
    #[instrument(skip(self, destination))]
    async fn search_hotels(
        &self,
        budget: f64,
        destination: &str,
        hotel_class: HotelClass,
    ) -> Vec<HotelRecord> {
        match self.fetch(budget, destination, hotel_class).await {
            Ok(hotels) => {
                info!(count = hotels.len(), "hotel search completed");
                hotels
            }
            Err(error) => {
                warn!(error = %error, "hotel search failed; showing no results");
                Vec::new()
            }
        }
    }
}

fn parse_hotels(entries: Vec<Value>) -> Vec<HotelRecord> {
    entries
        .iter()
        .filter_map(|entry| {
            let record = parse_hotel(entry);
            if record.is_none() {
                warn!("skipping hotel entry without a usable name or price");
            }
            record
        })
        .collect()
}

fn parse_hotel(entry: &Value) -> Option<HotelRecord> {
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())?;
    let price = match entry.get("price")? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .trim_start_matches(['₹', '$'])
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;

    Some(HotelRecord {
        name: name.to_string(),
        price_per_night: price,
    })
}
