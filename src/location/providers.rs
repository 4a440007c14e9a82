//! Geocoding providers: Nominatim over HTTP and the built-in metro table.

use super::regions;
use super::types::{Coordinates, GeoError};
use serde::Deserialize;
use std::time::Duration;

/// Something that turns a free-text query into coordinates within a deadline.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str, timeout: Duration) -> Result<Coordinates, GeoError>;
}

impl<F> Geocoder for F
where
    F: Fn(&str, Duration) -> Result<Coordinates, GeoError> + Send + Sync,
{
    fn geocode(&self, query: &str, timeout: Duration) -> Result<Coordinates, GeoError> {
        self(query, timeout)
    }
}

// ─── Built-in provider ──────────────────────────────────────────

/// Offline geocoder answering from the curated metro-area table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGeocoder;

impl Geocoder for BuiltinGeocoder {
    fn geocode(&self, query: &str, _timeout: Duration) -> Result<Coordinates, GeoError> {
        regions::metro_coordinates(query).ok_or_else(|| GeoError::NotFound(query.to_string()))
    }
}

// ─── Nominatim provider ─────────────────────────────────────────

pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "fut_travel/0.3 (travel-logistics)";

#[derive(Deserialize, Debug, Clone)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// OpenStreetMap Nominatim, first hit only.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    endpoint: String,
    user_agent: String,
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(NOMINATIM_ENDPOINT, DEFAULT_USER_AGENT)
    }
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(name = "nominatim", level = "debug", skip(self))]
    fn geocode(&self, query: &str, timeout: Duration) -> Result<Coordinates, GeoError> {
        let response = ureq::get(&self.endpoint)
            .set("User-Agent", &self.user_agent)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1")
            .timeout(timeout)
            .call()
            .map_err(|e| map_transport_error(e, timeout))?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

        let top = results
            .into_iter()
            .next()
            .ok_or_else(|| GeoError::NotFound(query.to_string()))?;

        tracing::debug!(display_name = ?top.display_name, "nominatim hit");
        parse_coordinates(&top.lat, &top.lon)
    }
}

fn map_transport_error(err: ureq::Error, timeout: Duration) -> GeoError {
    match err {
        ureq::Error::Status(code, _) => GeoError::Network(format!("HTTP status {}", code)),
        ureq::Error::Transport(t) => {
            if is_timeout(&t) {
                GeoError::Timeout(timeout)
            } else {
                GeoError::Network(t.to_string())
            }
        }
    }
}

/// Whether an I/O timeout sits anywhere in the error's source chain.
fn is_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if matches!(io.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock) {
                return true;
            }
        }
        current = e.source();
    }
    false
}

fn parse_coordinates(lat: &str, lon: &str) -> Result<Coordinates, GeoError> {
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| GeoError::InvalidResponse(format!("bad latitude '{}'", lat)))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| GeoError::InvalidResponse(format!("bad longitude '{}'", lon)))?;

    let coords = Coordinates::new(lat, lon);
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(GeoError::InvalidResponse(format!("out of range: {}, {}", lat, lon)))
    }
}
