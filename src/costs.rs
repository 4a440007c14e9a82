//! Transport cost models.
//!
//! All functions return unrounded figures; rounding happens once, at the
//! presentation boundary (`round_currency` / serialisation).

use crate::config::{AirFareBands, CarCostParams};

/// Whether a car trip is costed for one leg or there and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    OneWay,
    RoundTrip,
}

/// Fuel + toll cost of driving `distance_km` (doubled for a round trip).
pub fn car_cost(distance_km: f64, params: &CarCostParams, leg: Leg) -> f64 {
    let total_km = match leg {
        Leg::OneWay => distance_km,
        Leg::RoundTrip => distance_km * 2.0,
    };
    let fuel = total_km / params.fuel_efficiency_km_per_liter * params.fuel_price;
    let tolls = total_km * params.toll_rate_per_km;
    (fuel + tolls).max(0.0)
}

/// Single-leg fare linear in distance (public transit, intercity bus).
pub fn per_km_fare(distance_km: f64, rate_per_km: f64) -> f64 {
    (distance_km * rate_per_km).max(0.0)
}

/// Flat air fare picked from three distance bands.
pub fn air_fare(distance_km: f64, bands: &AirFareBands) -> f64 {
    if distance_km < f64::from(bands.short_haul_below_km) {
        bands.short_haul
    } else if distance_km < f64::from(bands.medium_haul_below_km) {
        bands.medium_haul
    } else {
        bands.long_haul
    }
}

/// Round to cents.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `serialize_with` helper so JSON output carries cents, not float noise.
pub(crate) fn serialize_currency<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_currency(*value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_round_trip_car_cost() {
        // 360 km each way: (720 / 10) * 5.80 + 720 * 0.15
        let cost = car_cost(360.0, &CarCostParams::default(), Leg::RoundTrip);
        assert_relative_eq!(cost, 525.6, epsilon = 1e-9);
    }

    #[test]
    fn test_one_way_is_half_of_round_trip() {
        let params = CarCostParams::default();
        for d in [0.0, 1.0, 31.0, 149.0, 360.0, 500.0, 1234.0] {
            assert_relative_eq!(
                car_cost(d, &params, Leg::OneWay),
                car_cost(d, &params, Leg::RoundTrip) / 2.0,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                car_cost(2.0 * d, &params, Leg::OneWay),
                car_cost(d, &params, Leg::RoundTrip),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_car_cost_custom_params() {
        let params = CarCostParams {
            fuel_efficiency_km_per_liter: 12.5,
            fuel_price: 6.0,
            toll_rate_per_km: 0.0,
        };
        assert_relative_eq!(car_cost(100.0, &params, Leg::OneWay), 48.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_distance_costs_nothing() {
        assert_eq!(car_cost(0.0, &CarCostParams::default(), Leg::RoundTrip), 0.0);
        assert_eq!(per_km_fare(0.0, 0.30), 0.0);
    }

    #[test]
    fn test_per_km_fare() {
        assert_relative_eq!(per_km_fare(30.0, 0.15), 4.5, epsilon = 1e-9);
        assert_relative_eq!(per_km_fare(290.0, 0.30), 87.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.0, 400.0)]
    #[case(852.0, 400.0)]
    #[case(999.0, 400.0)]
    #[case(1000.0, 600.0)]
    #[case(1454.0, 600.0)]
    #[case(1999.0, 600.0)]
    #[case(2000.0, 900.0)]
    #[case(2689.0, 900.0)]
    fn test_air_fare_bands(#[case] distance: f64, #[case] expected: f64) {
        assert_eq!(air_fare(distance, &AirFareBands::default()), expected);
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(60.588), 60.59);
        assert_eq!(round_currency(525.6000000001), 525.6);
        assert_eq!(round_currency(0.0), 0.0);
    }
}
