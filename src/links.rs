//! Booking links for travelling to a fixture: flights, lodging and driving route.
//!
//! Dates follow the match's local calendar in São Paulo time. Late kick-offs
//! (21:00 or later) push the return to the following day.

use crate::location::normalize_city;
use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use chrono_tz::America::Sao_Paulo;
use serde::Serialize;

pub const LATE_KICKOFF_HOUR: u32 = 21;

/// Airport (or metropolitan city) codes, keyed by accent-free uppercase name.
const IATA_CODES: &[(&str, &str)] = &[
    ("SAO PAULO", "GRU"),
    ("SP", "GRU"),
    ("GUARULHOS", "GRU"),
    ("SANTOS", "SAO"),
    ("BRAGANCA PAULISTA", "SAO"),
    ("CAMPINAS", "VCP"),
    ("RIBEIRAO PRETO", "RAO"),
    ("RIO DE JANEIRO", "GIG"),
    ("RJ", "GIG"),
    ("BRASILIA", "BSB"),
    ("BELO HORIZONTE", "CNF"),
    ("BH", "CNF"),
    ("UBERLANDIA", "UDI"),
    ("VITORIA", "VIX"),
    ("SALVADOR", "SSA"),
    ("FORTALEZA", "FOR"),
    ("CURITIBA", "CWB"),
    ("LONDRINA", "LDB"),
    ("RECIFE", "REC"),
    ("PORTO ALEGRE", "POA"),
    ("CAXIAS DO SUL", "CXJ"),
    ("MANAUS", "MAO"),
    ("FLORIANOPOLIS", "FLN"),
    ("JOINVILLE", "JOI"),
    ("CHAPECO", "XAP"),
    ("CRICIUMA", "CCM"),
    ("GOIANIA", "GYN"),
    ("CUIABA", "CGB"),
    ("CAMPO GRANDE", "CGR"),
    ("BELEM", "BEL"),
    ("NATAL", "NAT"),
    ("MACEIO", "MCZ"),
    ("JOAO PESSOA", "JPA"),
    ("SAO LUIS", "SLZ"),
    ("TERESINA", "THE"),
    ("ARACAJU", "AJU"),
    ("PORTO VELHO", "PVH"),
    ("RIO BRANCO", "RBR"),
    ("MACAPA", "MCP"),
    ("BOA VISTA", "BVB"),
    ("PALMAS", "PMW"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelLinks {
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    pub kickoff_hour: u32,
    pub return_next_day: bool,
    pub flights_skyscanner: String,
    pub flights_google: String,
    pub lodging: String,
    pub route: String,
}

/// Build the links for travelling from `origin` to a match in `destination`.
pub fn travel_links(
    origin: &str,
    destination: &str,
    kickoff: DateTime<Utc>,
    venue: Option<&str>,
) -> TravelLinks {
    let local = kickoff.with_timezone(&Sao_Paulo);
    let departure = local.date_naive();
    let kickoff_hour = local.hour();
    let return_next_day = kickoff_hour >= LATE_KICKOFF_HOUR;

    let next_day = departure.checked_add_days(Days::new(1)).unwrap_or(departure);
    let return_date = if return_next_day { next_day } else { departure };

    let from = iata_code(origin);
    let to = iata_code(destination);
    let flights_skyscanner = format!(
        "https://www.skyscanner.com.br/transport/flights/{}/{}/{}/{}/?adultsv2=1&cabinclass=economy&rtn=1",
        from,
        to,
        departure.format("%y%m%d"),
        return_date.format("%y%m%d"),
    );

    let google_query = format!(
        "Flights from {} to {} on {} returning {}",
        origin.trim(),
        destination.trim(),
        departure.format("%Y-%m-%d"),
        return_date.format("%Y-%m-%d"),
    );
    let flights_google = format!(
        "https://www.google.com/travel/flights?q={}",
        urlencoding::encode(&google_query)
    );

    // Booking needs at least one night.
    let checkout = return_date.max(next_day);
    let lodging = format!(
        "https://www.booking.com/searchresults.html?ss={}&checkin={}&checkout={}&group_adults=1&no_rooms=1&group_children=0",
        urlencoding::encode(destination.trim()),
        departure.format("%Y-%m-%d"),
        checkout.format("%Y-%m-%d"),
    );

    let route_target = match venue.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => format!("{},{}", v, destination.trim()),
        None => destination.trim().to_string(),
    };
    let route = format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={}&travelmode=driving",
        urlencoding::encode(origin.trim()),
        urlencoding::encode(&route_target),
    );

    TravelLinks {
        departure,
        return_date,
        kickoff_hour,
        return_next_day,
        flights_skyscanner,
        flights_google,
        lodging,
        route,
    }
}

/// Airport/city code for flight search.
///
/// Known cities and the `SP`/`RJ`/`BH` aliases map through the table, a
/// three-letter input is taken as a code already, and anything else falls
/// back to its first three letters.
pub fn iata_code(city: &str) -> String {
    let key = strip_accents(&normalize_city(city));
    if let Some((_, code)) = IATA_CODES.iter().find(|(name, _)| *name == key) {
        return (*code).to_string();
    }
    if key.len() == 3 && key.chars().all(|c| c.is_ascii_alphabetic()) {
        return key;
    }
    key.chars().filter(|c| c.is_ascii_alphabetic()).take(3).collect()
}

/// Fold the accented capitals that occur in Brazilian city names.
fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}
