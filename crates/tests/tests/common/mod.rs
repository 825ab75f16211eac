#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use parking_lot::Mutex;
use roam_providers::{
    parse_base_url, GeminiConfig, HotelSearchConfig, ProviderConfig, Secret, UnsplashConfig,
    DEFAULT_GEMINI_MODEL,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct StubCall {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub goog_api_key: Option<String>,
    pub body: String,
}

#[derive(Clone)]
pub struct StubBackends {
    pub generator: Reply,
    pub hotels: Reply,
    pub images: Reply,
    calls: Arc<Mutex<Vec<StubCall>>>,
}

impl StubBackends {
    pub fn healthy() -> Self {
        Self {
            generator: Reply::Json(gemini_text("Day 1: land in Goa and relax.")),
            hotels: Reply::Json(json!({
                "data": [
                    { "name": "Sea View Resort", "price": 4200 },
                    { "name": "Palm Grove", "price": "2,750" }
                ]
            })),
            images: Reply::Json(json!({
                "results": [
                    { "urls": { "regular": "https://images.example/goa-1.jpg" } },
                    { "urls": { "regular": "https://images.example/goa-2.jpg" } },
                    { "urls": { "regular": "https://images.example/goa-3.jpg" } }
                ]
            })),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, path_suffix: &str) -> Vec<StubCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path.ends_with(path_suffix))
            .collect()
    }

    /// Serves all three backends from one local listener and returns its base url.
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(dispatch).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub listener should bind");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });
        format!("http://{addr}/")
    }

    pub async fn spawn_config(&self) -> ProviderConfig {
        let base = self.spawn().await;
        stub_config(&base)
    }
}

/// Points all three backends at one base url with throwaway credentials.
pub fn stub_config(base_url: &str) -> ProviderConfig {
    let base = parse_base_url(base_url).expect("stub base url");
    ProviderConfig {
        gemini: GeminiConfig {
            api_key: Some(Secret::new("test-gemini-key")),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: base.clone(),
        },
        hotels: HotelSearchConfig {
            api_key: Some(Secret::new("test-hotel-key")),
            base_url: base.clone(),
        },
        images: UnsplashConfig {
            access_key: Some(Secret::new("test-unsplash-key")),
            base_url: base,
        },
        connect_timeout: Some(Duration::from_secs(2)),
        request_timeout: Some(Duration::from_secs(5)),
    }
}

pub fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

async fn dispatch(
    State(stub): State<StubBackends>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    stub.calls.lock().push(StubCall {
        method,
        path: path.clone(),
        query: uri.query().unwrap_or_default().to_string(),
        goog_api_key: headers
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let reply = if path.ends_with(":generateContent") {
        &stub.generator
    } else if path == "/v1/hotels" {
        &stub.hotels
    } else if path == "/search/photos" {
        &stub.images
    } else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match reply {
        Reply::Json(value) => Json(value.clone()).into_response(),
        Reply::Status(code) => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
    }
}
