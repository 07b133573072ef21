//! Manual-verification binary over the Jyotisha compute core. Grounded on
//! the pack's `dhruv_cli` pattern: a `clap::Parser`/`Subcommand` shell that
//! does nothing but parse arguments, call into a pure compute crate, and
//! print the result — no HTTP, no database, no auth surface.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use jyotisha_core::config::EngineConfig;
use jyotisha_core::Planet;
use jyotisha_ephemeris::EphemerisAdapter;

#[derive(Parser)]
#[command(name = "jyotisha", about = "Jyotisha computation engine CLI")]
struct Cli {
    /// Path to an optional TOML config file (see `EngineConfig::load`).
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds the full birth report (all Dn charts, Pañcāṅga, Daśā, yogas,
    /// strength) and prints it as pretty JSON.
    Report {
        date: String,
        time: String,
        latitude: f64,
        longitude: f64,
        timezone: String,
    },
    /// Prints the birth-date Pañcāṅga only.
    Panchanga {
        date: String,
        timezone: String,
        latitude: f64,
        longitude: f64,
    },
    /// Prints the current sidereal position of every graha.
    Transits,
    /// Scans a date range for a planet's sign-ingress events.
    Ingresses {
        planet: String,
        start: String,
        end: String,
    },
}

fn parse_planet(name: &str) -> Result<Planet> {
    Planet::ALL
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(name))
        .with_context(|| format!("unknown planet: {name}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;
    let eph = EphemerisAdapter::new(config.ephemeris_path.clone())
        .with_context(|| format!("failed to load ephemeris data from {}", config.ephemeris_path))?;

    match cli.command {
        Commands::Report {
            date,
            time,
            latitude,
            longitude,
            timezone,
        } => {
            let input = jyotisha_core::BirthInput {
                date,
                time,
                latitude,
                longitude,
                timezone,
            };
            let report = jyotisha_report::build_report(&eph, &input, &config.strength)?;
            println!("{}", jyotisha_report::to_json(&report)?);
        }

        Commands::Panchanga {
            date,
            timezone,
            latitude,
            longitude,
        } => {
            let snapshot =
                jyotisha_panchanga::compute_panchanga(&eph, &date, &timezone, latitude, longitude)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Commands::Transits => {
            let positions = jyotisha_report::current_transits(&eph, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&positions)?);
        }

        Commands::Ingresses {
            planet,
            start,
            end,
        } => {
            let planet = parse_planet(&planet)?;
            let start = start
                .parse()
                .with_context(|| format!("invalid start timestamp: {start}"))?;
            let end = end
                .parse()
                .with_context(|| format!("invalid end timestamp: {end}"))?;
            let ingresses = jyotisha_report::transit_ingresses(&eph, planet, start, end)?;
            println!("{}", serde_json::to_string_pretty(&ingresses)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_planet_is_case_insensitive() {
        assert_eq!(parse_planet("jupiter").unwrap(), Planet::Jupiter);
        assert_eq!(parse_planet("RAHU").unwrap(), Planet::Rahu);
    }

    #[test]
    fn parse_planet_rejects_unknown_names() {
        assert!(parse_planet("Pluto").is_err());
    }
}
