//! Engine configuration: geocoding, classification thresholds, fares and budget rates.
//!
//! Loaded from ~/.futtravel/config.json when present. Every field has a
//! default, so a partial file only overrides what it names.

use crate::error::TravelError;
use crate::location::providers::{DEFAULT_USER_AGENT, NOMINATIM_ENDPOINT};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding: GeocodingConfig,
    pub rules: RulesConfig,
    pub fares: FareConfig,
    pub budget: BudgetConfig,
}

/// Which geocoder backs the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderKind {
    #[default]
    Nominatim,
    /// Curated metro-area table only; no network.
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub provider: GeocoderKind,
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Appended to every query: "{city}, {country_qualifier}".
    pub country_qualifier: String,
    /// Keep resolved coordinates on disk between runs.
    pub persist_cache: bool,
    pub cache_path: Option<PathBuf>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: GeocoderKind::Nominatim,
            endpoint: NOMINATIM_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 5,
            country_qualifier: "Brasil".to_string(),
            persist_cache: false,
            cache_path: None,
        }
    }
}

impl GeocodingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Distance thresholds in km. Boundaries are inclusive on the shorter-range side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub transit_max_km: u32,
    pub local_car_max_km: u32,
    pub road_trip_max_km: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            transit_max_km: 30,
            local_car_max_km: 150,
            road_trip_max_km: 500,
        }
    }
}

/// Parameters of the fuel + toll car model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarCostParams {
    pub fuel_efficiency_km_per_liter: f64,
    pub fuel_price: f64,
    pub toll_rate_per_km: f64,
}

impl Default for CarCostParams {
    fn default() -> Self {
        Self {
            fuel_efficiency_km_per_liter: 10.0,
            fuel_price: 5.80,
            toll_rate_per_km: 0.15,
        }
    }
}

/// Three-band flat air fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirFareBands {
    pub short_haul_below_km: u32,
    pub short_haul: f64,
    pub medium_haul_below_km: u32,
    pub medium_haul: f64,
    pub long_haul: f64,
}

impl Default for AirFareBands {
    fn default() -> Self {
        Self {
            short_haul_below_km: 1000,
            short_haul: 400.0,
            medium_haul_below_km: 2000,
            medium_haul: 600.0,
            long_haul: 900.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    pub car: CarCostParams,
    pub transit_per_km: f64,
    pub bus_per_km: f64,
    pub air: AirFareBands,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            car: CarCostParams::default(),
            transit_per_km: 0.15,
            bus_per_km: 0.30,
            air: AirFareBands::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub parking_per_day: f64,
    pub lodging_per_night: f64,
    /// Single pre-match meal on a local trip.
    pub local_meal: f64,
    pub food_per_day: f64,
    pub default_trip_days: u32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            parking_per_day: 50.0,
            lodging_per_night: 200.0,
            local_meal: 50.0,
            food_per_day: 150.0,
            default_trip_days: 2,
        }
    }
}

impl Config {
    /// Default config file location (~/.futtravel/config.json).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".futtravel")
            .join("config.json")
    }

    /// Load from an explicit path, or the default path if it exists.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    tracing::debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            TravelError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let car = &self.fares.car;
        if !(car.fuel_efficiency_km_per_liter > 0.0) {
            return Err(TravelError::config("fuel_efficiency_km_per_liter must be positive"));
        }

        let prices = [
            ("fuel_price", car.fuel_price),
            ("toll_rate_per_km", car.toll_rate_per_km),
            ("transit_per_km", self.fares.transit_per_km),
            ("bus_per_km", self.fares.bus_per_km),
            ("air.short_haul", self.fares.air.short_haul),
            ("air.medium_haul", self.fares.air.medium_haul),
            ("air.long_haul", self.fares.air.long_haul),
            ("parking_per_day", self.budget.parking_per_day),
            ("lodging_per_night", self.budget.lodging_per_night),
            ("local_meal", self.budget.local_meal),
            ("food_per_day", self.budget.food_per_day),
        ];
        for (name, value) in prices {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(TravelError::config(format!("{} must be a non-negative number", name)));
            }
        }

        let rules = &self.rules;
        if !(rules.transit_max_km < rules.local_car_max_km) {
            return Err(TravelError::config("transit_max_km must be below local_car_max_km"));
        }
        if rules.road_trip_max_km == 0 {
            return Err(TravelError::config("road_trip_max_km must be positive"));
        }

        let air = &self.fares.air;
        if !(air.short_haul_below_km < air.medium_haul_below_km) {
            return Err(TravelError::config(
                "air short_haul_below_km must be below medium_haul_below_km",
            ));
        }

        if self.budget.default_trip_days == 0 {
            return Err(TravelError::config("default_trip_days must be at least 1"));
        }

        if self.geocoding.timeout_seconds == 0 {
            return Err(TravelError::config("geocoding timeout_seconds must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.geocoding.timeout(), Duration::from_secs(5));
        assert_eq!(config.geocoding.country_qualifier, "Brasil");
        assert_eq!(config.rules.road_trip_max_km, 500);
        assert_eq!(config.budget.default_trip_days, 2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "fares": { "car": { "fuel_price": 6.29 } }, "geocoding": { "provider": "builtin" } }"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.fares.car.fuel_price, 6.29);
        assert_eq!(config.fares.car.fuel_efficiency_km_per_liter, 10.0);
        assert_eq!(config.fares.bus_per_km, 0.30);
        assert_eq!(config.geocoding.provider, GeocoderKind::Builtin);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, TravelError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(TravelError::Json(_))));
    }

    #[test]
    fn test_validate_rejects_zero_fuel_efficiency() {
        let mut config = Config::default();
        config.fares.car.fuel_efficiency_km_per_liter = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut config = Config::default();
        config.budget.lodging_per_night = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = Config::default();
        config.rules.transit_max_km = 200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_trip_days() {
        let mut config = Config::default();
        config.budget.default_trip_days = 0;
        assert!(config.validate().is_err());
    }
}
