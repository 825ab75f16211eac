use serde::Serialize;
use thiserror::Error;

use crate::models::{SuggestForm, TripForm, TripRequest, MIN_BUDGET};

pub const MISSING_DETAILS_MESSAGE: &str = "Please fill in all required details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Budget,
    Origin,
    Destination,
    Travelers,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::Travelers => "travelers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required details.")]
    MissingFields(Vec<RequiredField>),
    #[error("Budget must be at least {minimum} INR.")]
    BudgetBelowMinimum { minimum: f64 },
}

impl ValidationError {
    pub fn missing(&self) -> &[RequiredField] {
        match self {
            Self::MissingFields(fields) => fields,
            Self::BudgetBelowMinimum { .. } => &[],
        }
    }
}

impl TripForm {
    /// Presence checks for the Generate-Plan transition. Hotel class and car
    /// rental fall back to the form defaults.
    pub fn validate(&self) -> Result<TripRequest, ValidationError> {
        let mut missing = Vec::new();

        let budget = present_budget(self.budget);
        if budget.is_none() {
            missing.push(RequiredField::Budget);
        }
        let origin = present_text(self.origin.as_deref());
        if origin.is_none() {
            missing.push(RequiredField::Origin);
        }
        let destination = present_text(self.destination.as_deref());
        if destination.is_none() {
            missing.push(RequiredField::Destination);
        }
        let travelers = self
            .travelers
            .filter(|count| *count > 0)
            .and_then(|count| u32::try_from(count).ok());
        if travelers.is_none() {
            missing.push(RequiredField::Travelers);
        }

        match (budget, origin, destination, travelers) {
            (Some(budget), Some(origin), Some(destination), Some(travelers)) => {
                check_minimum(budget)?;
                Ok(TripRequest {
                    budget,
                    origin,
                    destination,
                    hotel_class: self.hotel_class.unwrap_or_default(),
                    travelers,
                    rent_car: self.rent_car.map(|choice| choice.0).unwrap_or(true),
                })
            }
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

impl SuggestForm {
    pub fn validate(&self) -> Result<f64, ValidationError> {
        let budget = present_budget(self.budget)
            .ok_or_else(|| ValidationError::MissingFields(vec![RequiredField::Budget]))?;
        check_minimum(budget)?;
        Ok(budget)
    }
}

fn present_budget(value: Option<f64>) -> Option<f64> {
    value.filter(|budget| budget.is_finite() && *budget > 0.0)
}

fn present_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

fn check_minimum(budget: f64) -> Result<(), ValidationError> {
    if budget < MIN_BUDGET {
        return Err(ValidationError::BudgetBelowMinimum {
            minimum: MIN_BUDGET,
        });
    }
    Ok(())
}
