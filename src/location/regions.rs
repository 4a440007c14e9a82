//! Built-in metro-area table: city name → region code and reference coordinates.
//!
//! Lookups are case-insensitive but diacritics-sensitive: "SAO PAULO" and
//! "SÃO PAULO" both match only because both spellings are listed.

use super::types::{Coordinates, RegionCode};
use serde::Serialize;

// ─── Metro-area dataset ─────────────────────────────────────────

pub(crate) struct MetroArea {
    pub names: &'static [&'static str], // canonical + aliases, uppercase
    pub region: RegionCode,
    pub lat: f64,
    pub lon: f64,
}

const METRO_AREAS: &[MetroArea] = &[
    // Sudeste
    MetroArea { names: &["SÃO PAULO", "SAO PAULO"], region: RegionCode::Sp, lat: -23.5505, lon: -46.6333 },
    MetroArea { names: &["CAMPINAS"], region: RegionCode::Sp, lat: -22.9099, lon: -47.0626 },
    MetroArea { names: &["SANTOS"], region: RegionCode::Sp, lat: -23.9608, lon: -46.3336 },
    MetroArea { names: &["GUARULHOS"], region: RegionCode::Sp, lat: -23.4538, lon: -46.5333 },
    MetroArea { names: &["SÃO BERNARDO DO CAMPO", "SAO BERNARDO DO CAMPO"], region: RegionCode::Sp, lat: -23.6914, lon: -46.5646 },
    MetroArea { names: &["BRAGANÇA PAULISTA", "BRAGANCA PAULISTA"], region: RegionCode::Sp, lat: -22.9527, lon: -46.5419 },
    MetroArea { names: &["RIBEIRÃO PRETO", "RIBEIRAO PRETO"], region: RegionCode::Sp, lat: -21.1775, lon: -47.8103 },
    MetroArea { names: &["SOROCABA"], region: RegionCode::Sp, lat: -23.5015, lon: -47.4526 },
    MetroArea { names: &["PIRACICABA"], region: RegionCode::Sp, lat: -22.7338, lon: -47.6476 },
    MetroArea { names: &["MIRASSOL"], region: RegionCode::Sp, lat: -20.8169, lon: -49.5206 },
    MetroArea { names: &["BARUERI"], region: RegionCode::Sp, lat: -23.5057, lon: -46.8790 },
    MetroArea { names: &["RIO DE JANEIRO"], region: RegionCode::Rj, lat: -22.9068, lon: -43.1729 },
    MetroArea { names: &["NITERÓI", "NITEROI"], region: RegionCode::Rj, lat: -22.8832, lon: -43.1034 },
    MetroArea { names: &["VOLTA REDONDA"], region: RegionCode::Rj, lat: -22.5231, lon: -44.1040 },
    MetroArea { names: &["BELO HORIZONTE"], region: RegionCode::Mg, lat: -19.9167, lon: -43.9345 },
    MetroArea { names: &["UBERLÂNDIA", "UBERLANDIA"], region: RegionCode::Mg, lat: -18.9186, lon: -48.2772 },
    MetroArea { names: &["JUIZ DE FORA"], region: RegionCode::Mg, lat: -21.7642, lon: -43.3503 },
    MetroArea { names: &["VITÓRIA", "VITORIA"], region: RegionCode::Es, lat: -20.3155, lon: -40.3128 },
    // Sul
    MetroArea { names: &["PORTO ALEGRE"], region: RegionCode::Rs, lat: -30.0346, lon: -51.2177 },
    MetroArea { names: &["CAXIAS DO SUL"], region: RegionCode::Rs, lat: -29.1678, lon: -51.1794 },
    MetroArea { names: &["PELOTAS"], region: RegionCode::Rs, lat: -31.7654, lon: -52.3376 },
    MetroArea { names: &["CURITIBA"], region: RegionCode::Pr, lat: -25.4284, lon: -49.2733 },
    MetroArea { names: &["LONDRINA"], region: RegionCode::Pr, lat: -23.3045, lon: -51.1696 },
    MetroArea { names: &["FLORIANÓPOLIS", "FLORIANOPOLIS"], region: RegionCode::Sc, lat: -27.5954, lon: -48.5480 },
    MetroArea { names: &["CHAPECÓ", "CHAPECO"], region: RegionCode::Sc, lat: -27.1004, lon: -52.6152 },
    MetroArea { names: &["CRICIÚMA", "CRICIUMA"], region: RegionCode::Sc, lat: -28.6775, lon: -49.3697 },
    MetroArea { names: &["JOINVILLE"], region: RegionCode::Sc, lat: -26.3045, lon: -48.8487 },
    // Centro-Oeste
    MetroArea { names: &["BRASÍLIA", "BRASILIA"], region: RegionCode::Df, lat: -15.7939, lon: -47.8828 },
    MetroArea { names: &["GOIÂNIA", "GOIANIA"], region: RegionCode::Go, lat: -16.6869, lon: -49.2648 },
    MetroArea { names: &["CUIABÁ", "CUIABA"], region: RegionCode::Mt, lat: -15.6014, lon: -56.0979 },
    MetroArea { names: &["CAMPO GRANDE"], region: RegionCode::Ms, lat: -20.4697, lon: -54.6201 },
    // Nordeste
    MetroArea { names: &["SALVADOR"], region: RegionCode::Ba, lat: -12.9777, lon: -38.5016 },
    MetroArea { names: &["RECIFE"], region: RegionCode::Pe, lat: -8.0476, lon: -34.8770 },
    MetroArea { names: &["FORTALEZA"], region: RegionCode::Ce, lat: -3.7319, lon: -38.5267 },
    MetroArea { names: &["NATAL"], region: RegionCode::Rn, lat: -5.7945, lon: -35.2110 },
    MetroArea { names: &["MACEIÓ", "MACEIO"], region: RegionCode::Al, lat: -9.6658, lon: -35.7353 },
    MetroArea { names: &["JOÃO PESSOA", "JOAO PESSOA"], region: RegionCode::Pb, lat: -7.1195, lon: -34.8450 },
    MetroArea { names: &["SÃO LUÍS", "SAO LUIS"], region: RegionCode::Ma, lat: -2.5307, lon: -44.3068 },
    MetroArea { names: &["TERESINA"], region: RegionCode::Pi, lat: -5.0919, lon: -42.8034 },
    MetroArea { names: &["ARACAJU"], region: RegionCode::Se, lat: -10.9472, lon: -37.0731 },
    // Norte
    MetroArea { names: &["MANAUS"], region: RegionCode::Am, lat: -3.1190, lon: -60.0217 },
    MetroArea { names: &["BELÉM", "BELEM"], region: RegionCode::Pa, lat: -1.4558, lon: -48.4902 },
    MetroArea { names: &["PORTO VELHO"], region: RegionCode::Ro, lat: -8.7612, lon: -63.9004 },
    MetroArea { names: &["RIO BRANCO"], region: RegionCode::Ac, lat: -9.9747, lon: -67.8243 },
    MetroArea { names: &["MACAPÁ", "MACAPA"], region: RegionCode::Ap, lat: 0.0349, lon: -51.0694 },
    MetroArea { names: &["BOA VISTA"], region: RegionCode::Rr, lat: 2.8235, lon: -60.6758 },
    MetroArea { names: &["PALMAS"], region: RegionCode::To, lat: -10.2491, lon: -48.3243 },
];

const COUNTRY_SUFFIXES: &[&str] = &[", BRASIL", ", BRAZIL", " - BRASIL", " - BRAZIL"];

// ─── Normalisation ──────────────────────────────────────────────

/// Uppercase, collapse whitespace and strip trailing region/country suffixes.
///
/// "São Paulo - SP" → "SÃO PAULO", "Curitiba/PR, Brasil" → "CURITIBA".
pub fn normalize_city(city: &str) -> String {
    let mut name = city
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    while let Some(rest) = strip_known_suffix(&name) {
        name = rest.trim_end().to_string();
    }
    name
}

fn strip_known_suffix(name: &str) -> Option<&str> {
    for suffix in COUNTRY_SUFFIXES {
        if let Some(rest) = name.strip_suffix(suffix) {
            return Some(rest);
        }
    }

    for code in RegionCode::ALL {
        let c = code.as_str();
        let patterns = [
            format!(" - {c}"),
            format!("-{c}"),
            format!(" / {c}"),
            format!("/{c}"),
            format!(", {c}"),
            format!(",{c}"),
            format!(" ({c})"),
        ];
        for pattern in &patterns {
            if let Some(rest) = name.strip_suffix(pattern.as_str()) {
                if !rest.trim().is_empty() {
                    return Some(rest);
                }
            }
        }
    }
    None
}

// ─── Lookups ────────────────────────────────────────────────────

pub(crate) fn find_metro(city: &str) -> Option<&'static MetroArea> {
    let key = normalize_city(city);
    if key.is_empty() {
        return None;
    }
    METRO_AREAS
        .iter()
        .find(|area| area.names.iter().any(|name| *name == key))
}

/// Region code for a city, or `None` for anything outside the curated table.
pub fn resolve_region(city: &str) -> Option<RegionCode> {
    find_metro(city).map(|area| area.region)
}

/// Reference coordinates for a curated city (used by the offline geocoder).
pub fn metro_coordinates(city: &str) -> Option<Coordinates> {
    find_metro(city).map(|area| Coordinates::new(area.lat, area.lon))
}

/// A city entry for listing the curated table.
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub name: String,
    pub region: RegionCode,
    pub lat: f64,
    pub lon: f64,
}

/// Every curated metro area, canonical spelling only.
pub fn known_cities() -> Vec<CityInfo> {
    METRO_AREAS
        .iter()
        .map(|area| CityInfo {
            name: area.names[0].to_string(),
            region: area.region,
            lat: area.lat,
            lon: area.lon,
        })
        .collect()
}
