use crate::models::CURRENCY_CODE;

pub const NO_RESPONSE_TEXT: &str = "No response from AI.";
pub const PLAN_FAILED_TEXT: &str = "Error fetching travel plan.";
pub const SUGGESTION_FAILED_TEXT: &str = "Error fetching destination suggestion.";

/// Parameters are embedded as typed by the user, without escaping.
pub fn travel_plan_prompt(budget: f64, destination: &str, travelers: u32, origin: &str) -> String {
    format!(
        "Create a travel plan for {travelers} people travelling from {origin} to {destination} with a budget of {budget} {CURRENCY_CODE}."
    )
}

pub fn destination_suggestion_prompt(budget: f64) -> String {
    format!(
        "Suggest a single travel destination within a budget of {budget} {CURRENCY_CODE}. Reply with only the destination name."
    )
}
