use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    plan_transitions_total: AtomicU64,
    suggest_transitions_total: AtomicU64,
    validation_failures_total: AtomicU64,
    generator_fallbacks_total: AtomicU64,
    empty_hotel_results_total: AtomicU64,
    empty_image_results_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub plan_transitions_total: u64,
    pub suggest_transitions_total: u64,
    pub validation_failures_total: u64,
    pub generator_fallbacks_total: u64,
    pub empty_hotel_results_total: u64,
    pub empty_image_results_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_plan_transition(&self) {
        self.plan_transitions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_suggest_transition(&self) {
        self.suggest_transitions_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validation_failure(&self) {
        self.validation_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generator_fallback(&self) {
        self.generator_fallbacks_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_empty_hotels(&self) {
        self.empty_hotel_results_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_empty_images(&self) {
        self.empty_image_results_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let plans = self.plan_transitions_total.load(Ordering::Relaxed);
        let suggestions = self.suggest_transitions_total.load(Ordering::Relaxed);
        let transitions = plans + suggestions;
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            plan_transitions_total: plans,
            suggest_transitions_total: suggestions,
            validation_failures_total: self.validation_failures_total.load(Ordering::Relaxed),
            generator_fallbacks_total: self.generator_fallbacks_total.load(Ordering::Relaxed),
            empty_hotel_results_total: self.empty_hotel_results_total.load(Ordering::Relaxed),
            empty_image_results_total: self.empty_image_results_total.load(Ordering::Relaxed),
            avg_latency_millis: if transitions == 0 {
                0.0
            } else {
                latency as f64 / transitions as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,roam_api=info,roam_agents=info,roam_providers=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
