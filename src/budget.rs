//! Trip budget: transport plus parking, lodging and food estimates.

use crate::config::BudgetConfig;
use crate::costs::serialize_currency;
use crate::error::TravelError;
use crate::logistics::{LogisticsResult, TransportMode, TripCategory};
use crate::Result;
use serde::Serialize;

/// Itemised trip cost. Ticket and extras are supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripBudget {
    pub trip_days: u32,
    #[serde(serialize_with = "serialize_currency")]
    pub transport: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub parking: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub lodging: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub food: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub ticket: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub extras: f64,
    #[serde(serialize_with = "serialize_currency")]
    pub total: f64,
}

impl TripBudget {
    pub fn with_ticket(mut self, ticket: f64) -> Result<Self> {
        self.ticket = non_negative("ticket", ticket)?;
        self.recompute_total();
        Ok(self)
    }

    pub fn with_extras(mut self, extras: f64) -> Result<Self> {
        self.extras = non_negative("extras", extras)?;
        self.recompute_total();
        Ok(self)
    }

    fn recompute_total(&mut self) {
        self.total =
            self.transport + self.parking + self.lodging + self.food + self.ticket + self.extras;
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TravelError::invalid_input(format!(
            "{} must be a non-negative amount, got {}",
            field, value
        )))
    }
}

/// Category/mode pairs the classifier can produce.
fn check_contract(category: TripCategory, mode: TransportMode) -> Result<()> {
    use TransportMode::*;
    let valid = match category {
        TripCategory::Local => matches!(mode, Transit | Car | Bus),
        TripCategory::Trip => matches!(mode, Car | Plane),
    };
    if valid {
        Ok(())
    } else {
        Err(TravelError::IncompatibleMode { category, mode })
    }
}

/// Build the budget for a classified trip lasting `trip_days` days.
///
/// Lodging covers `trip_days - 1` nights: the traveller heads home the night
/// after the match.
pub fn budget(result: &LogisticsResult, trip_days: u32, rates: &BudgetConfig) -> Result<TripBudget> {
    if trip_days == 0 {
        return Err(TravelError::invalid_input("trip_days must be at least 1"));
    }
    check_contract(result.category, result.mode)?;
    let transport = non_negative("transport cost", result.cost)?;

    let days = f64::from(trip_days);
    let is_trip = result.category == TripCategory::Trip;

    let parking = if is_trip && result.mode == TransportMode::Car {
        rates.parking_per_day * days
    } else {
        0.0
    };
    let lodging = if is_trip {
        rates.lodging_per_night * f64::from(trip_days - 1)
    } else {
        0.0
    };
    let food = match result.category {
        TripCategory::Local => rates.local_meal,
        TripCategory::Trip => rates.food_per_day * days,
    };

    let mut budget = TripBudget {
        trip_days,
        transport,
        parking,
        lodging,
        food,
        ticket: 0.0,
        extras: 0.0,
        total: 0.0,
    };
    budget.recompute_total();
    Ok(budget)
}
