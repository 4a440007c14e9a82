//! Logistics classifier: trip category, transport mode, distance and transport cost.
//!
//! Rules (thresholds from `RulesConfig`, inclusive on the shorter-range side):
//!
//! | same region | distance       | mode    | cost                  |
//! |-------------|----------------|---------|-----------------------|
//! | yes         | ≤ 30 km        | TRANSIT | 0.15 / km             |
//! | yes         | ≤ 150 km       | CAR     | one-way fuel + tolls  |
//! | yes         | > 150 km       | BUS     | 0.30 / km             |
//! | no          | ≤ 500 km       | CAR     | round-trip fuel + tolls |
//! | no          | > 500 km       | PLANE   | banded flat fare      |
//!
//! An unresolvable region is never "same region", and missing coordinates
//! mean distance 0: a best estimate beats no estimate.

use crate::config::{FareConfig, RulesConfig};
use crate::costs::{self, Leg};
use crate::location::{is_undefined, CityLocation, Coordinates, GeoResolver, RegionCode};
use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TripCategory {
    /// Origin and destination in the same region.
    Local,
    /// Different or unknown regions.
    Trip,
}

impl fmt::Display for TripCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "LOCAL"),
            Self::Trip => write!(f, "TRIP"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    Transit,
    Car,
    Bus,
    Plane,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transit => write!(f, "TRANSIT"),
            Self::Car => write!(f, "CAR"),
            Self::Bus => write!(f, "BUS"),
            Self::Plane => write!(f, "PLANE"),
        }
    }
}

/// Outcome of classifying an ordered (origin, destination) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogisticsResult {
    pub category: TripCategory,
    pub mode: TransportMode,
    pub distance_km: u32,
    pub same_region: bool,
    /// Transport cost, unrounded.
    #[serde(serialize_with = "costs::serialize_currency")]
    pub cost: f64,
}

impl LogisticsResult {
    /// Returned when origin or destination is missing.
    pub fn fallback() -> Self {
        Self {
            category: TripCategory::Trip,
            mode: TransportMode::Car,
            distance_km: 0,
            same_region: false,
            cost: 0.0,
        }
    }
}

/// Apply the rule table to an already-measured pair.
pub fn decide(
    same_region: bool,
    distance_km: u32,
    rules: &RulesConfig,
    fares: &FareConfig,
) -> LogisticsResult {
    let km = f64::from(distance_km);

    let (category, mode, cost) = if same_region {
        if distance_km <= rules.transit_max_km {
            (TripCategory::Local, TransportMode::Transit, costs::per_km_fare(km, fares.transit_per_km))
        } else if distance_km <= rules.local_car_max_km {
            (TripCategory::Local, TransportMode::Car, costs::car_cost(km, &fares.car, Leg::OneWay))
        } else {
            (TripCategory::Local, TransportMode::Bus, costs::per_km_fare(km, fares.bus_per_km))
        }
    } else if distance_km <= rules.road_trip_max_km {
        (TripCategory::Trip, TransportMode::Car, costs::car_cost(km, &fares.car, Leg::RoundTrip))
    } else {
        (TripCategory::Trip, TransportMode::Plane, costs::air_fare(km, &fares.air))
    };

    LogisticsResult {
        category,
        mode,
        distance_km,
        same_region,
        cost,
    }
}

/// Great-circle distance in whole kilometres (truncated).
pub fn geodesic_km(a: Coordinates, b: Coordinates) -> u32 {
    let km = distance(
        HaversineLocation { latitude: a.lat, longitude: a.lon },
        HaversineLocation { latitude: b.lat, longitude: b.lon },
        Units::Kilometers,
    );
    if km.is_finite() && km > 0.0 {
        km as u32
    } else {
        0
    }
}

/// Same region only when both sides resolve and agree.
pub fn same_region(origin: Option<RegionCode>, destination: Option<RegionCode>) -> bool {
    matches!((origin, destination), (Some(a), Some(b)) if a == b)
}

/// Classifies trips using a resolver and the configured rules and fares.
pub struct Classifier<'a> {
    resolver: &'a GeoResolver,
    rules: &'a RulesConfig,
    fares: &'a FareConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(resolver: &'a GeoResolver, rules: &'a RulesConfig, fares: &'a FareConfig) -> Self {
        Self { resolver, rules, fares }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn classify(&self, origin: &str, destination: &str) -> LogisticsResult {
        if is_undefined(origin) || is_undefined(destination) {
            tracing::warn!("origin or destination missing, using fallback estimate");
            return LogisticsResult::fallback();
        }
        let (from, to) = self.locate_pair(origin, destination);
        self.classify_located(&from, &to)
    }

    /// Classify two cities that were already located.
    pub fn classify_located(&self, origin: &CityLocation, destination: &CityLocation) -> LogisticsResult {
        if is_undefined(&origin.name) || is_undefined(&destination.name) {
            return LogisticsResult::fallback();
        }

        let same_region = same_region(origin.region, destination.region);
        let distance_km = match (origin.coords, destination.coords) {
            (Some(a), Some(b)) => geodesic_km(a, b),
            _ => 0,
        };

        let result = decide(same_region, distance_km, self.rules, self.fares);
        tracing::debug!(
            category = %result.category,
            mode = %result.mode,
            distance_km,
            cost = result.cost,
            "classified"
        );
        result
    }

    /// Locate both cities; distinct names resolve in parallel.
    pub fn locate_pair(&self, origin: &str, destination: &str) -> (CityLocation, CityLocation) {
        if origin.trim() == destination.trim() {
            let location = self.resolver.locate(origin);
            return (location.clone(), location);
        }

        thread::scope(|s| {
            let handle = s.spawn(|| self.resolver.locate(destination));
            let from = self.resolver.locate(origin);
            let to = handle.join().unwrap_or_else(|_| {
                tracing::warn!("destination lookup panicked");
                CityLocation {
                    name: destination.trim().to_string(),
                    region: self.resolver.resolve_region(destination),
                    coords: None,
                }
            });
            (from, to)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn rules() -> RulesConfig {
        RulesConfig::default()
    }

    fn fares() -> FareConfig {
        FareConfig::default()
    }

    #[rstest]
    #[case(0, TransportMode::Transit)]
    #[case(30, TransportMode::Transit)]
    #[case(31, TransportMode::Car)]
    #[case(150, TransportMode::Car)]
    #[case(151, TransportMode::Bus)]
    #[case(900, TransportMode::Bus)]
    fn test_same_region_boundaries(#[case] km: u32, #[case] mode: TransportMode) {
        let result = decide(true, km, &rules(), &fares());
        assert_eq!(result.mode, mode);
        assert_eq!(result.category, TripCategory::Local);
        assert!(result.same_region);
    }

    #[rstest]
    #[case(0, TransportMode::Car)]
    #[case(500, TransportMode::Car)]
    #[case(501, TransportMode::Plane)]
    #[case(3000, TransportMode::Plane)]
    fn test_cross_region_boundaries(#[case] km: u32, #[case] mode: TransportMode) {
        let result = decide(false, km, &rules(), &fares());
        assert_eq!(result.mode, mode);
        assert_eq!(result.category, TripCategory::Trip);
    }

    #[test]
    fn test_decide_costs() {
        assert_relative_eq!(decide(true, 30, &rules(), &fares()).cost, 4.5, epsilon = 1e-9);
        // One-way car: 83/10*5.80 + 83*0.15
        assert_relative_eq!(decide(true, 83, &rules(), &fares()).cost, 60.59, epsilon = 1e-9);
        assert_relative_eq!(decide(true, 290, &rules(), &fares()).cost, 87.0, epsilon = 1e-9);
        assert_relative_eq!(decide(false, 360, &rules(), &fares()).cost, 525.6, epsilon = 1e-9);
        assert_relative_eq!(decide(false, 852, &rules(), &fares()).cost, 400.0);
        assert_relative_eq!(decide(false, 2131, &rules(), &fares()).cost, 900.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let rules = RulesConfig {
            transit_max_km: 10,
            local_car_max_km: 100,
            road_trip_max_km: 300,
        };
        assert_eq!(decide(true, 11, &rules, &fares()).mode, TransportMode::Car);
        assert_eq!(decide(false, 301, &rules, &fares()).mode, TransportMode::Plane);
    }

    #[test]
    fn test_same_region_requires_both() {
        assert!(same_region(Some(RegionCode::Sp), Some(RegionCode::Sp)));
        assert!(!same_region(Some(RegionCode::Sp), Some(RegionCode::Rj)));
        assert!(!same_region(Some(RegionCode::Sp), None));
        assert!(!same_region(None, None));
    }

    #[test]
    fn test_geodesic_km_truncates() {
        let sp = Coordinates::new(-23.5505, -46.6333);
        let rj = Coordinates::new(-22.9068, -43.1729);
        // ~360.75 km
        assert_eq!(geodesic_km(sp, rj), 360);
        assert_eq!(geodesic_km(sp, sp), 0);
    }

    #[test]
    fn test_classify_same_city() {
        let resolver = GeoResolver::offline();
        let (rules, fares) = (rules(), fares());
        let result = Classifier::new(&resolver, &rules, &fares).classify("São Paulo", "São Paulo");
        assert_eq!(result.category, TripCategory::Local);
        assert_eq!(result.mode, TransportMode::Transit);
        assert_eq!(result.distance_km, 0);
        assert!(result.same_region);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_classify_empty_input_falls_back() {
        let resolver = GeoResolver::offline();
        let (rules, fares) = (rules(), fares());
        let classifier = Classifier::new(&resolver, &rules, &fares);
        assert_eq!(classifier.classify("", "Recife"), LogisticsResult::fallback());
        assert_eq!(classifier.classify("Recife", "   "), LogisticsResult::fallback());
    }

    #[test]
    fn test_locate_pair_shares_lookup_for_same_city() {
        use crate::location::{GeoError, MemoryCache};
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use std::time::Duration;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let geocoder = move |_: &str, _: Duration| -> Result<Coordinates, GeoError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Coordinates::new(-12.97, -38.50))
        };
        let resolver = GeoResolver::new(MemoryCache::new(), geocoder);
        let (rules, fares) = (rules(), fares());
        let classifier = Classifier::new(&resolver, &rules, &fares);

        let (a, b) = classifier.locate_pair("Salvador", " Salvador ");
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        classifier.locate_pair("Salvador", "Recife");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TripCategory::Trip.to_string(), "TRIP");
        assert_eq!(TransportMode::Transit.to_string(), "TRANSIT");
        assert_eq!(serde_json::to_string(&TransportMode::Plane).unwrap(), "\"PLANE\"");
    }
}
