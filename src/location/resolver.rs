//! Geo resolver: region lookup plus cache-backed coordinate lookup.
//!
//! Coordinate flow:  sentinel check → cache → geocoder ("{city}, {qualifier}") → cache insert
//! Failures are logged and returned as `None`; they are not cached, so the
//! next call for the same city retries the geocoder.

use super::cache::{CoordinateCache, FileCache, MemoryCache};
use super::providers::{BuiltinGeocoder, Geocoder, NominatimGeocoder};
use super::regions;
use super::types::{CityLocation, Coordinates, RegionCode};
use crate::config::{GeocoderKind, GeocodingConfig};
use std::time::Duration;

/// Placeholder the fixture feed uses for venues not yet announced.
pub const UNDEFINED_CITY: &str = "A definir";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_COUNTRY_QUALIFIER: &str = "Brasil";

/// Resolves city names to regions and coordinates.
pub struct GeoResolver {
    cache: Box<dyn CoordinateCache>,
    geocoder: Box<dyn Geocoder>,
    timeout: Duration,
    country_qualifier: String,
}

impl GeoResolver {
    pub fn new(cache: impl CoordinateCache + 'static, geocoder: impl Geocoder + 'static) -> Self {
        Self {
            cache: Box::new(cache),
            geocoder: Box::new(geocoder),
            timeout: DEFAULT_TIMEOUT,
            country_qualifier: DEFAULT_COUNTRY_QUALIFIER.to_string(),
        }
    }

    /// Resolver answering only from the built-in metro table.
    pub fn offline() -> Self {
        Self::new(MemoryCache::new(), BuiltinGeocoder)
    }

    /// Build the cache and geocoder named by the configuration.
    pub fn from_config(config: &GeocodingConfig) -> Self {
        let cache: Box<dyn CoordinateCache> = if config.persist_cache {
            let path = config.cache_path.clone().unwrap_or_else(FileCache::default_path);
            Box::new(FileCache::load_from(path))
        } else {
            Box::new(MemoryCache::new())
        };

        let geocoder: Box<dyn Geocoder> = match config.provider {
            GeocoderKind::Nominatim => Box::new(NominatimGeocoder::new(
                config.endpoint.clone(),
                config.user_agent.clone(),
            )),
            GeocoderKind::Builtin => Box::new(BuiltinGeocoder),
        };

        Self {
            cache,
            geocoder,
            timeout: config.timeout(),
            country_qualifier: config.country_qualifier.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_country_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.country_qualifier = qualifier.into();
        self
    }

    pub fn cache(&self) -> &dyn CoordinateCache {
        self.cache.as_ref()
    }

    /// Region code from the curated table; `None` for unknown cities.
    pub fn resolve_region(&self, city: &str) -> Option<RegionCode> {
        regions::resolve_region(city)
    }

    /// Coordinates for a city, consulting the cache before the geocoder.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_coordinates(&self, city: &str) -> Option<Coordinates> {
        let key = city.trim();
        if is_undefined(key) {
            tracing::debug!("undefined city, skipping lookup");
            return None;
        }

        if let Some(coords) = self.cache.get(key) {
            tracing::debug!("cache hit");
            return Some(coords);
        }

        let query = if self.country_qualifier.is_empty() {
            key.to_string()
        } else {
            format!("{}, {}", key, self.country_qualifier)
        };

        match self.geocoder.geocode(&query, self.timeout) {
            Ok(coords) if coords.is_valid() => {
                self.cache.put(key, coords);
                tracing::debug!(lat = coords.lat, lon = coords.lon, "geocoded");
                Some(coords)
            }
            Ok(coords) => {
                tracing::warn!(?coords, "geocoder returned out-of-range coordinates");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "geocoding failed");
                None
            }
        }
    }

    /// Name, region and coordinates in one call.
    pub fn locate(&self, city: &str) -> CityLocation {
        CityLocation {
            name: city.trim().to_string(),
            region: self.resolve_region(city),
            coords: self.resolve_coordinates(city),
        }
    }
}

/// Empty names and the "A definir" placeholder never resolve.
pub fn is_undefined(city: &str) -> bool {
    let city = city.trim();
    city.is_empty() || city.eq_ignore_ascii_case(UNDEFINED_CITY)
}
