//! End-to-end trip scenarios with geocoding served from the built-in table
//! or from test doubles. Nothing here touches the network.

use approx::assert_relative_eq;
use fut_travel::config::Config;
use fut_travel::costs::{car_cost, Leg};
use fut_travel::location::{
    BuiltinGeocoder, Coordinates, GeoError, GeoResolver, Geocoder, MemoryCache,
};
use fut_travel::{PlanRequest, Planner, TransportMode, TripCategory};
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn offline_planner() -> Planner {
    Planner::new(GeoResolver::offline(), Config::default())
}

#[test]
fn sao_paulo_to_rio_is_a_road_trip() {
    let result = offline_planner().classify("São Paulo", "Rio de Janeiro");

    assert_eq!(result.category, TripCategory::Trip);
    assert_eq!(result.mode, TransportMode::Car);
    assert_eq!(result.distance_km, 360);
    assert!(!result.same_region);
    assert_relative_eq!(result.cost, 525.6, epsilon = 1e-9);
}

#[test]
fn same_city_is_local_transit_for_free() {
    let result = offline_planner().classify("São Paulo", "São Paulo");

    assert_eq!(result.category, TripCategory::Local);
    assert_eq!(result.mode, TransportMode::Transit);
    assert_eq!(result.distance_km, 0);
    assert!(result.same_region);
    assert_eq!(result.cost, 0.0);
}

#[test]
fn same_city_outside_region_table_is_a_zero_cost_car_trip() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let geocoder = move |_: &str, _: Duration| -> Result<Coordinates, GeoError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Coordinates::new(-23.4205, -51.9333))
    };
    let planner = Planner::new(GeoResolver::new(MemoryCache::new(), geocoder), Config::default());

    let result = planner.classify("Maringá", "Maringá");

    assert_eq!(result.distance_km, 0);
    assert!(!result.same_region);
    assert_eq!(result.category, TripCategory::Trip);
    assert_eq!(result.mode, TransportMode::Car);
    assert_eq!(result.cost, 0.0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unresolvable_destination_defaults_to_zero_cost_car_trip() {
    let result = offline_planner().classify("São Paulo", "Timbuktu");

    assert_eq!(result.category, TripCategory::Trip);
    assert_eq!(result.mode, TransportMode::Car);
    assert_eq!(result.distance_km, 0);
    assert!(!result.same_region);
    assert_eq!(result.cost, car_cost(0.0, &Config::default().fares.car, Leg::RoundTrip));
}

#[test]
fn undefined_venue_never_geocodes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let geocoder = move |query: &str, timeout: Duration| -> Result<Coordinates, GeoError> {
        counter.fetch_add(1, Ordering::SeqCst);
        BuiltinGeocoder.geocode(query, timeout)
    };
    let planner = Planner::new(GeoResolver::new(MemoryCache::new(), geocoder), Config::default());

    let result = planner.classify("Recife", "A definir");
    assert_eq!(result.mode, TransportMode::Car);
    assert_eq!(result.distance_km, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[case("São Paulo", "Guarulhos", TripCategory::Local, TransportMode::Transit, 14, 2.1)]
#[case("São Paulo", "Campinas", TripCategory::Local, TransportMode::Car, 83, 60.59)]
#[case("São Paulo", "Ribeirão Preto", TripCategory::Local, TransportMode::Bus, 290, 87.0)]
#[case("São Paulo", "Belo Horizonte", TripCategory::Trip, TransportMode::Car, 490, 715.4)]
#[case("São Paulo", "Porto Alegre", TripCategory::Trip, TransportMode::Plane, 852, 400.0)]
#[case("São Paulo", "Salvador", TripCategory::Trip, TransportMode::Plane, 1454, 600.0)]
#[case("São Paulo", "Recife", TripCategory::Trip, TransportMode::Plane, 2131, 900.0)]
fn classifies_real_city_pairs(
    #[case] origin: &str,
    #[case] destination: &str,
    #[case] category: TripCategory,
    #[case] mode: TransportMode,
    #[case] distance_km: u32,
    #[case] cost: f64,
) {
    let result = offline_planner().classify(origin, destination);
    assert_eq!(result.category, category);
    assert_eq!(result.mode, mode);
    assert_eq!(result.distance_km, distance_km);
    assert_relative_eq!(result.cost, cost, epsilon = 1e-9);
}

#[test]
fn classification_is_ordered_but_symmetric_for_distance() {
    let planner = offline_planner();
    let there = planner.classify("Curitiba", "Florianópolis");
    let back = planner.classify("Florianópolis", "Curitiba");
    assert_eq!(there.distance_km, back.distance_km);
    assert_eq!(there.mode, back.mode);
}

#[test]
fn three_day_road_trip_budget() {
    let planner = offline_planner();
    let result = planner.classify("São Paulo", "Rio de Janeiro");
    let budget = planner.budget(&result, Some(3)).unwrap();

    assert_eq!(budget.parking, 150.0);
    assert_eq!(budget.lodging, 400.0);
    assert_eq!(budget.food, 450.0);
    assert_relative_eq!(budget.total, result.cost + 150.0 + 400.0 + 450.0, epsilon = 1e-9);
}

#[test]
fn failed_lookups_are_retried_on_next_request() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let flaky = move |query: &str, _: Duration| -> Result<Coordinates, GeoError> {
        // First call for every query times out, later ones succeed.
        if counter.fetch_add(1, Ordering::SeqCst) < 2 {
            Err(GeoError::Timeout(Duration::from_secs(5)))
        } else {
            BuiltinGeocoder.geocode(query, Duration::from_secs(5))
        }
    };
    let planner = Planner::new(GeoResolver::new(MemoryCache::new(), flaky), Config::default());

    let degraded = planner.classify("Natal", "Fortaleza");
    assert_eq!(degraded.distance_km, 0);

    let recovered = planner.classify("Natal", "Fortaleza");
    assert!(recovered.distance_km > 400);
    assert_eq!(calls.load(Ordering::SeqCst), 4);

    // Both cities are now cached.
    planner.classify("Natal", "Fortaleza");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn full_plan_serializes_rounded_amounts() {
    let request = PlanRequest {
        trip_days: Some(1),
        ticket: Some(95.5),
        ..PlanRequest::default()
    };
    let plan = offline_planner().plan("São Paulo", "Campinas", &request).unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["logistics"]["mode"], "CAR");
    assert_eq!(json["logistics"]["cost"], 60.59);
    assert_eq!(json["budget"]["food"], 50.0);
    assert_eq!(json["budget"]["total"], 206.09);
    assert_eq!(json["destination"]["region"], "SP");
}
