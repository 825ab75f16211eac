use crate::models::CostBreakdown;

pub const HOTEL_SHARE: f64 = 0.4;
pub const CAR_RENTAL_SHARE: f64 = 0.2;
pub const FUEL_SHARE: f64 = 0.05;

pub fn estimate_costs(budget: f64, rent_car: bool) -> CostBreakdown {
    let hotel_allocation = round_currency(budget * HOTEL_SHARE);
    let (car_rental, fuel_cost) = if rent_car {
        (
            round_currency(budget * CAR_RENTAL_SHARE),
            round_currency(budget * FUEL_SHARE),
        )
    } else {
        (0.0, 0.0)
    };

    CostBreakdown {
        hotel_allocation,
        car_rental,
        fuel_cost,
        total: round_currency(hotel_allocation + car_rental + fuel_cost),
    }
}

/// Two decimal places, half away from zero. Ties that binary floats store a
/// hair below the midpoint (`1.005`) are nudged up by a few ulps first.
/// Values too large to scale are already whole and come back unchanged.
pub fn round_currency(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    let nudged = scaled + scaled.signum() * scaled.abs() * f64::EPSILON * 8.0;
    nudged.round() / 100.0
}
