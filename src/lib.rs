//! Fut Travel: travel logistics for football fixtures.
//!
//! Given the city a fan lives in and the city a match is played in, the
//! engine decides how to get there (transit, car, bus or plane), estimates
//! the distance and transport cost, and prices the whole trip.

pub mod budget;
pub mod config;
pub mod costs;
pub mod error;
pub mod links;
pub mod location;
pub mod logistics;
pub mod planner;

pub use budget::TripBudget;
pub use config::Config;
pub use error::TravelError;
pub use location::{CityLocation, Coordinates, GeoResolver, RegionCode};
pub use logistics::{LogisticsResult, TransportMode, TripCategory};
pub use planner::{PlanRequest, Planner, TripPlan};

pub type Result<T> = std::result::Result<T, TravelError>;
