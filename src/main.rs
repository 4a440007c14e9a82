use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;
use clap::Parser;
use fut_travel::config::{Config, GeocoderKind};
use fut_travel::location::known_cities;
use fut_travel::planner::{render_summary, PlanRequest, Planner};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fut Travel: how to get to the match, and what it will cost.
///
/// Classifies the trip between two cities (transit, car, bus or plane),
/// estimates distance and transport cost, and prices the whole trip.
///
/// Examples:
///   futtravel "São Paulo" "Rio de Janeiro"
///   futtravel Campinas "São Paulo" --days 1 --ticket 120
///   futtravel "Porto Alegre" Recife --kickoff "2026-03-14 21:30" --venue "Arena de Pernambuco"
///   futtravel Curitiba Florianópolis --offline
#[derive(Parser)]
#[command(name = "futtravel", version, about, long_about = None)]
struct Cli {
    /// City you travel from.
    #[arg(index = 1)]
    origin: Option<String>,

    /// City the match is played in.
    #[arg(index = 2)]
    destination: Option<String>,

    /// Trip length in days (defaults to the configured value, normally 2).
    #[arg(long, short = 'd')]
    days: Option<u32>,

    /// Kick-off: RFC 3339, or "YYYY-MM-DD HH:MM" in São Paulo time.
    #[arg(long, value_parser = parse_kickoff)]
    kickoff: Option<DateTime<Utc>>,

    /// Stadium name, used for the driving route link.
    #[arg(long)]
    venue: Option<String>,

    /// Match ticket price to include in the budget.
    #[arg(long)]
    ticket: Option<f64>,

    /// Any other expenses to include in the budget.
    #[arg(long)]
    extras: Option<f64>,

    /// Offline mode: only use the built-in city table.
    #[arg(long)]
    offline: bool,

    /// Config file (defaults to ~/.futtravel/config.json if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the built-in city table as JSON and exit.
    #[arg(long)]
    list_cities: bool,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_kickoff(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M")
        .map_err(|e| format!("Invalid kick-off '{}': {}. Use RFC 3339 or 'YYYY-MM-DD HH:MM'.", s, e))?;
    Sao_Paulo
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or skipped local time '{}'", s))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_cities {
        print_json(&known_cities());
        return;
    }

    // ── Configuration ───────────────────────────────────────────

    let mut config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if cli.offline {
        config.geocoding.provider = GeocoderKind::Builtin;
    }

    let (origin, destination) = match (&cli.origin, &cli.destination) {
        (Some(o), Some(d)) => (o.as_str(), d.as_str()),
        _ => {
            eprintln!("Error: Origin and destination are required.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  futtravel \"São Paulo\" \"Rio de Janeiro\"");
            eprintln!("  futtravel Campinas \"São Paulo\" --days 1 --ticket 120");
            eprintln!("  futtravel --list-cities");
            std::process::exit(1);
        }
    };

    // ── Plan ────────────────────────────────────────────────────

    let planner = Planner::from_config(config);
    let request = PlanRequest {
        trip_days: cli.days,
        kickoff: cli.kickoff,
        venue: cli.venue.as_deref(),
        ticket: cli.ticket,
        extras: cli.extras,
    };

    let plan = planner.plan(origin, destination, &request).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // Summary to stderr, JSON to stdout
    eprint!("{}", render_summary(&plan));
    print_json(&plan);
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
