//! Gemini `generateContent` client used for itinerary drafting and
//! destination suggestions.

use reqwest::Client;
use roam_core::prompts::{destination_suggestion_prompt, travel_plan_prompt};
use roam_core::{ItineraryGenerator, ProviderError};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::{endpoint, GeminiConfig};
use crate::transport_error;

const SERVICE: &str = "itinerary generator";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(http: Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    async fn generate_text(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(ProviderError::NotConfigured { service: SERVICE })?;
        let url = endpoint(
            SERVICE,
            &self.config.base_url,
            &format!("v1beta/models/{}:generateContent", self.config.model),
        )?;

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key.expose())
            .json(&json!({
                "contents": [
                    { "parts": [ { "text": prompt } ] }
                ]
            }))
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

        let body: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|error| ProviderError::Decode {
                    service: SERVICE,
                    message: error.without_url().to_string(),
                })?;

        let text = extract_candidate_text(body);
        debug!(
            model = %self.config.model,
            has_text = text.is_some(),
            "generator responded"
        );
        Ok(text)
    }
}

impl ItineraryGenerator for GeminiClient {
    #[instrument(skip(self, destination, origin))]
    async fn generate_plan(
        &self,
        budget: f64,
        destination: &str,
        travelers: u32,
        origin: &str,
    ) -> Result<Option<String>, ProviderError> {
        let prompt = travel_plan_prompt(budget, destination, travelers, origin);
        self.generate_text(&prompt).await
    }

    #[instrument(skip(self))]
    async fn suggest_destination(&self, budget: f64) -> Result<Option<String>, ProviderError> {
        let prompt = destination_suggestion_prompt(budget);
        let text = self.generate_text(&prompt).await?;
        Ok(text
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }
}

fn extract_candidate_text(body: GenerateContentResponse) -> Option<String> {
    let content = body.candidates.into_iter().next()?.content?;
    let text = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .concat();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
