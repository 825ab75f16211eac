use std::sync::Arc;
use std::time::Instant;

use roam_core::prompts::{NO_RESPONSE_TEXT, PLAN_FAILED_TEXT, SUGGESTION_FAILED_TEXT};
use roam_core::{
    estimate_costs, HotelRecord, HotelSearch, ImageSearch, ItineraryGenerator, PlanOutcome,
    ProviderError, SuggestForm, SuggestionOutcome, TripForm, TripRequest, ValidationError,
};
use roam_observability::AppMetrics;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlannerOptions {
    /// Issue the generator, hotel and image calls of a plan concurrently.
    pub concurrent_fanout: bool,
}

/// Runs the Generate-Plan and Suggest-Destination transitions over the three
/// backends. Holds no per-submission state.
pub struct TripPlannerAgent<G, H, I>
where
    G: ItineraryGenerator,
    H: HotelSearch,
    I: ImageSearch,
{
    generator: Arc<G>,
    hotels: Arc<H>,
    images: Arc<I>,
    metrics: Arc<AppMetrics>,
    options: PlannerOptions,
}

impl<G, H, I> Clone for TripPlannerAgent<G, H, I>
where
    G: ItineraryGenerator,
    H: HotelSearch,
    I: ImageSearch,
{
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            hotels: Arc::clone(&self.hotels),
            images: Arc::clone(&self.images),
            metrics: Arc::clone(&self.metrics),
            options: self.options,
        }
    }
}

impl<G, H, I> TripPlannerAgent<G, H, I>
where
    G: ItineraryGenerator,
    H: HotelSearch,
    I: ImageSearch,
{
    pub fn new(
        generator: Arc<G>,
        hotels: Arc<H>,
        images: Arc<I>,
        metrics: Arc<AppMetrics>,
        options: PlannerOptions,
    ) -> Self {
        Self {
            generator,
            hotels,
            images,
            metrics,
            options,
        }
    }

    pub fn options(&self) -> PlannerOptions {
        self.options
    }

    pub async fn generate_plan(&self, form: &TripForm) -> Result<PlanOutcome, ValidationError> {
        let request = form.validate().map_err(|error| {
            self.metrics.inc_validation_failure();
            info!(missing = ?error.missing(), "plan rejected by validation");
            error
        })?;

        let transition_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "generate_plan",
            transition_id = %transition_id,
            hotel_class = %request.hotel_class,
            travelers = request.travelers,
            fanout = self.options.concurrent_fanout,
        );

        Ok(self.run_plan(transition_id, request).instrument(span).await)
    }

    async fn run_plan(
        &self,
        transition_id: String,
        request: TripRequest,
    ) -> PlanOutcome {
        let started = Instant::now();
        self.metrics.inc_plan_transition();

        let costs = estimate_costs(request.budget, request.rent_car);

        let ((itinerary, notices), hotels, images) = if self.options.concurrent_fanout {
            tokio::join!(
                self.draft_itinerary(&request),
                self.hotels.search_hotels(
                    costs.hotel_allocation,
                    &request.destination,
                    request.hotel_class
                ),
                self.images.search_images(&request.destination),
            )
        } else {
            let itinerary = self.draft_itinerary(&request).await;
            let hotels = self
                .hotels
                .search_hotels(
                    costs.hotel_allocation,
                    &request.destination,
                    request.hotel_class,
                )
                .await;
            let images = self.images.search_images(&request.destination).await;
            (itinerary, hotels, images)
        };

        self.record_empty_results(&hotels, &images);

        self.metrics.observe_latency(started.elapsed());
        info!(
            hotels = hotels.len(),
            images = images.len(),
            notices = notices.len(),
            total_cost = costs.total,
            "plan generated"
        );

        PlanOutcome {
            transition_id,
            origin: request.origin,
            destination: request.destination,
            budget: request.budget,
            travelers: request.travelers,
            hotel_class: request.hotel_class,
            itinerary,
            hotels,
            images,
            costs,
            notices,
        }
    }

    pub async fn suggest_destination(
        &self,
        form: &SuggestForm,
    ) -> Result<SuggestionOutcome, ValidationError> {
        let budget = form.validate().map_err(|error| {
            self.metrics.inc_validation_failure();
            info!("suggestion rejected by validation");
            error
        })?;

        let transition_id = Uuid::new_v4().to_string();
        let span = info_span!("suggest_destination", transition_id = %transition_id);

        let outcome = async {
            let started = Instant::now();
            self.metrics.inc_suggest_transition();

            let outcome = match self.generator.suggest_destination(budget).await {
                Ok(Some(destination)) => {
                    let images = self.images.search_images(&destination).await;
                    if images.is_empty() {
                        self.metrics.inc_empty_images();
                    }
                    SuggestionOutcome {
                        transition_id,
                        budget,
                        destination,
                        images,
                        notices: Vec::new(),
                    }
                }
                Ok(None) => {
                    self.metrics.inc_generator_fallback();
                    SuggestionOutcome {
                        transition_id,
                        budget,
                        destination: NO_RESPONSE_TEXT.to_string(),
                        images: Vec::new(),
                        notices: Vec::new(),
                    }
                }
                Err(error) => {
                    self.metrics.inc_generator_fallback();
                    SuggestionOutcome {
                        transition_id,
                        budget,
                        destination: SUGGESTION_FAILED_TEXT.to_string(),
                        images: Vec::new(),
                        notices: vec![generator_notice(&error)],
                    }
                }
            };

            self.metrics.observe_latency(started.elapsed());
            info!(images = outcome.images.len(), "destination suggested");
            outcome
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }

    async fn draft_itinerary(&self, request: &TripRequest) -> (String, Vec<String>) {
        let result = self
            .generator
            .generate_plan(
                request.budget,
                &request.destination,
                request.travelers,
                &request.origin,
            )
            .await;

        match result {
            Ok(Some(text)) => (text, Vec::new()),
            Ok(None) => {
                self.metrics.inc_generator_fallback();
                (NO_RESPONSE_TEXT.to_string(), Vec::new())
            }
            Err(error) => {
                self.metrics.inc_generator_fallback();
                (PLAN_FAILED_TEXT.to_string(), vec![generator_notice(&error)])
            }
        }
    }

    fn record_empty_results(&self, hotels: &[HotelRecord], images: &[String]) {
        if hotels.is_empty() {
            self.metrics.inc_empty_hotels();
        }
        if images.is_empty() {
            self.metrics.inc_empty_images();
        }
    }
}

fn generator_notice(error: &ProviderError) -> String {
    warn!(error = %error, "itinerary generator failed; using fallback text");
    format!("Error with itinerary service: {error}")
}
