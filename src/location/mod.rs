//! Location subsystem for the travel engine.
//!
//! Maps city names to region codes (curated table) and to coordinates
//! (injected cache in front of an injected geocoder).

pub mod cache;
pub mod providers;
pub mod regions;
pub mod resolver;
pub mod types;

pub use cache::{CoordinateCache, FileCache, MemoryCache};
pub use providers::{BuiltinGeocoder, Geocoder, NominatimGeocoder};
pub use regions::{known_cities, normalize_city, resolve_region, CityInfo};
pub use resolver::{is_undefined, GeoResolver, UNDEFINED_CITY};
pub use types::{CityLocation, Coordinates, GeoError, RegionCode};
