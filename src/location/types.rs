//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Brazilian federative unit (state or federal district).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionCode {
    Ac, Al, Am, Ap, Ba, Ce, Df, Es, Go, Ma, Mg, Ms, Mt, Pa,
    Pb, Pe, Pi, Pr, Rj, Rn, Ro, Rr, Rs, Sc, Se, Sp, To,
}

impl RegionCode {
    pub const ALL: [RegionCode; 27] = [
        Self::Ac, Self::Al, Self::Am, Self::Ap, Self::Ba, Self::Ce, Self::Df,
        Self::Es, Self::Go, Self::Ma, Self::Mg, Self::Ms, Self::Mt, Self::Pa,
        Self::Pb, Self::Pe, Self::Pi, Self::Pr, Self::Rj, Self::Rn, Self::Ro,
        Self::Rr, Self::Rs, Self::Sc, Self::Se, Self::Sp, Self::To,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ac => "AC", Self::Al => "AL", Self::Am => "AM", Self::Ap => "AP",
            Self::Ba => "BA", Self::Ce => "CE", Self::Df => "DF", Self::Es => "ES",
            Self::Go => "GO", Self::Ma => "MA", Self::Mg => "MG", Self::Ms => "MS",
            Self::Mt => "MT", Self::Pa => "PA", Self::Pb => "PB", Self::Pe => "PE",
            Self::Pi => "PI", Self::Pr => "PR", Self::Rj => "RJ", Self::Rn => "RN",
            Self::Ro => "RO", Self::Rr => "RR", Self::Rs => "RS", Self::Sc => "SC",
            Self::Se => "SE", Self::Sp => "SP", Self::To => "TO",
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| format!("Unknown region code '{}'", s))
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Rejects NaN and out-of-range values coming back from a provider.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A city as seen by the classifier: free-text name plus whatever could be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub name: String,
    pub region: Option<RegionCode>,
    pub coords: Option<Coordinates>,
}

/// Geocoding failures. Never surfaced past the resolver.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Geocoding timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Location not found: '{0}'")]
    NotFound(String),
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}
