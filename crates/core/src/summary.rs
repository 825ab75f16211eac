use crate::models::{PlanOutcome, SuggestionOutcome, CURRENCY_SYMBOL};

pub fn format_amount(value: f64) -> String {
    format!("{CURRENCY_SYMBOL}{value:.2}")
}

pub fn hotel_line(name: &str, price_per_night: f64) -> String {
    format!("**{name}** - {} per night", format_amount(price_per_night))
}

/// Plain-text rendering of a plan, section by section, as the form shows it.
pub fn render_plan_text(outcome: &PlanOutcome) -> String {
    let mut out = Vec::new();

    for notice in &outcome.notices {
        out.push(format!("! {notice}"));
    }

    out.push(format!("## Travel Plan for {}", outcome.destination));
    out.push(outcome.itinerary.clone());
    out.push(String::new());

    out.push(format!("## Hotels in {} within budget:", outcome.destination));
    if outcome.hotels.is_empty() {
        out.push("No hotels found.".to_string());
    } else {
        out.extend(
            outcome
                .hotels
                .iter()
                .map(|hotel| hotel_line(&hotel.name, hotel.price_per_night)),
        );
    }
    out.push(String::new());

    if !outcome.images.is_empty() {
        out.push(format!("## Photos of {}", outcome.destination));
        out.extend(outcome.images.iter().cloned());
        out.push(String::new());
    }

    out.push("## Summary of Your Plan".to_string());
    out.push(format!("Starting Point: {}", outcome.origin));
    out.push(format!("Destination: {}", outcome.destination));
    out.push(format!("Budget: {}", format_amount(outcome.budget)));
    out.push(format!(
        "Hotel Allocation: {}",
        format_amount(outcome.costs.hotel_allocation)
    ));
    out.push(format!(
        "Car Rental Cost: {}",
        format_amount(outcome.costs.car_rental)
    ));
    out.push(format!("Fuel Cost: {}", format_amount(outcome.costs.fuel_cost)));
    out.push(format!(
        "Total Estimated Cost: {}",
        format_amount(outcome.costs.total)
    ));

    out.join("\n")
}

pub fn render_suggestion_text(outcome: &SuggestionOutcome) -> String {
    let mut out = Vec::new();
    for notice in &outcome.notices {
        out.push(format!("! {notice}"));
    }
    out.push(format!(
        "Suggested destination for {}: {}",
        format_amount(outcome.budget),
        outcome.destination
    ));
    out.extend(outcome.images.iter().cloned());
    out.join("\n")
}
