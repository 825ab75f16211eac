use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_BUDGET: f64 = 50_000.0;
pub const MIN_BUDGET: f64 = 1_000.0;
pub const CURRENCY_CODE: &str = "INR";
pub const CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HotelClass {
    #[default]
    Budget,
    TwoStar,
    ThreeStar,
    FiveStar,
}

impl HotelClass {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "budget" | "economy" | "1" => Some(Self::Budget),
            "2-star" | "2 star" | "2star" | "two-star" | "2" => Some(Self::TwoStar),
            "3-star" | "3 star" | "3star" | "three-star" | "3" => Some(Self::ThreeStar),
            "5-star" | "5 star" | "5star" | "five-star" | "luxury" | "5" => Some(Self::FiveStar),
            _ => None,
        }
    }

    /// Value sent as `hotel_type` and shown in the form selector.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::TwoStar => "2-Star",
            Self::ThreeStar => "3-Star",
            Self::FiveStar => "5-Star",
        }
    }
}

impl std::fmt::Display for HotelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for HotelClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for HotelClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown hotel class `{raw}`")))
    }
}

/// Car rental choice as the form sends it: a bool or a `Yes`/`No` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentCar(pub bool);

impl RentCar {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Some(Self(true)),
            "no" | "n" | "false" | "0" => Some(Self(false)),
            _ => None,
        }
    }
}

impl Serialize for RentCar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for RentCar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(Self(flag)),
            Raw::Text(text) => Self::parse(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("expected Yes or No, got `{text}`"))),
        }
    }
}

/// Raw submission from the form or the JSON API. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripForm {
    pub budget: Option<f64>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub hotel_class: Option<HotelClass>,
    /// Signed so a zero or negative count reaches validation as missing.
    pub travelers: Option<i64>,
    pub rent_car: Option<RentCar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestForm {
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub budget: f64,
    pub origin: String,
    pub destination: String,
    pub hotel_class: HotelClass,
    pub travelers: u32,
    pub rent_car: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    pub price_per_night: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub hotel_allocation: f64,
    pub car_rental: f64,
    pub fuel_cost: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub transition_id: String,
    pub origin: String,
    pub destination: String,
    pub budget: f64,
    pub travelers: u32,
    pub hotel_class: HotelClass,
    pub itinerary: String,
    pub hotels: Vec<HotelRecord>,
    pub images: Vec<String>,
    pub costs: CostBreakdown,
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    pub transition_id: String,
    pub budget: f64,
    pub destination: String,
    pub images: Vec<String>,
    pub notices: Vec<String>,
}
