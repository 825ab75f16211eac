pub mod cost;
pub mod models;
pub mod ports;
pub mod prompts;
pub mod summary;
pub mod validation;

pub use cost::{estimate_costs, round_currency};
pub use models::*;
pub use ports::{HotelSearch, ImageSearch, ItineraryGenerator, ProviderError};
pub use summary::{render_plan_text, render_suggestion_text};
pub use validation::{RequiredField, ValidationError, MISSING_DETAILS_MESSAGE};
