//! The Planner, primary public API of the engine.
//!
//! Owns the resolver and configuration; turns two city names (plus an
//! optional kick-off time) into a classified, budgeted trip plan.

use crate::budget::{self, TripBudget};
use crate::config::Config;
use crate::costs::round_currency;
use crate::links::{self, TravelLinks};
use crate::location::{CityLocation, GeoResolver};
use crate::logistics::{Classifier, LogisticsResult};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

/// Everything the UI layer needs to show for one fixture.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub origin: CityLocation,
    pub destination: CityLocation,
    pub logistics: LogisticsResult,
    pub budget: TripBudget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<TravelLinks>,
}

/// Optional inputs to `Planner::plan`.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest<'a> {
    pub trip_days: Option<u32>,
    pub kickoff: Option<DateTime<Utc>>,
    pub venue: Option<&'a str>,
    pub ticket: Option<f64>,
    pub extras: Option<f64>,
}

pub struct Planner {
    resolver: GeoResolver,
    config: Config,
}

impl Planner {
    pub fn new(resolver: GeoResolver, config: Config) -> Self {
        Self { resolver, config }
    }

    /// Build the resolver described by the configuration.
    pub fn from_config(config: Config) -> Self {
        let resolver = GeoResolver::from_config(&config.geocoding);
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &GeoResolver {
        &self.resolver
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.resolver, &self.config.rules, &self.config.fares)
    }

    pub fn classify(&self, origin: &str, destination: &str) -> LogisticsResult {
        self.classifier().classify(origin, destination)
    }

    /// Budget with the configured rates; `None` uses the default trip length.
    pub fn budget(&self, result: &LogisticsResult, trip_days: Option<u32>) -> Result<TripBudget> {
        let days = trip_days.unwrap_or(self.config.budget.default_trip_days);
        budget::budget(result, days, &self.config.budget)
    }

    pub fn plan(&self, origin: &str, destination: &str, request: &PlanRequest<'_>) -> Result<TripPlan> {
        let classifier = self.classifier();
        let (from, to) = classifier.locate_pair(origin, destination);
        let logistics = classifier.classify_located(&from, &to);

        let mut budget = self.budget(&logistics, request.trip_days)?;
        if let Some(ticket) = request.ticket {
            budget = budget.with_ticket(ticket)?;
        }
        if let Some(extras) = request.extras {
            budget = budget.with_extras(extras)?;
        }

        let links = request
            .kickoff
            .map(|kickoff| links::travel_links(origin, destination, kickoff, request.venue));

        Ok(TripPlan {
            origin: from,
            destination: to,
            logistics,
            budget,
            links,
        })
    }
}

/// Terminal summary of a plan.
pub fn render_summary(plan: &TripPlan) -> String {
    let mut out = String::new();
    let region = |c: &CityLocation| c.region.map(|r| r.to_string()).unwrap_or_else(|| "??".into());

    let _ = writeln!(
        out,
        "  {} ({}) \u{2192} {} ({})",
        plan.origin.name,
        region(&plan.origin),
        plan.destination.name,
        region(&plan.destination),
    );
    let _ = writeln!(
        out,
        "  {} by {} \u{00B7} {} km \u{00B7} transport R$ {:.2}",
        plan.logistics.category,
        plan.logistics.mode,
        plan.logistics.distance_km,
        round_currency(plan.logistics.cost),
    );

    let b = &plan.budget;
    let _ = writeln!(out, "  Budget for {} day(s):", b.trip_days);
    for (label, value) in [
        ("transport", b.transport),
        ("parking", b.parking),
        ("lodging", b.lodging),
        ("food", b.food),
        ("ticket", b.ticket),
        ("extras", b.extras),
    ] {
        if value > 0.0 {
            let _ = writeln!(out, "    {:<10} R$ {:>9.2}", label, round_currency(value));
        }
    }
    let _ = writeln!(out, "    {:<10} R$ {:>9.2}", "total", round_currency(b.total));

    if let Some(links) = &plan.links {
        let _ = writeln!(
            out,
            "  Depart {} \u{00B7} return {}{}",
            links.departure,
            links.return_date,
            if links.return_next_day { " (late kick-off)" } else { "" },
        );
        let _ = writeln!(out, "    flights  {}", links.flights_skyscanner);
        let _ = writeln!(out, "    lodging  {}", links.lodging);
        let _ = writeln!(out, "    route    {}", links.route);
    }
    out
}
