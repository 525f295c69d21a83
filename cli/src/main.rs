//! Fleet Ledger CLI
//!
//! ```sh
//! # Dashboard figures for the demo fleet
//! fleet-ledger
//! fleet-ledger summary --json
//!
//! # Dump every collection
//! fleet-ledger snapshot
//!
//! # Plan, dispatch and complete one trip
//! fleet-ledger simulate --vehicle v1 --driver d6 --cargo 18000 --distance 380
//!
//! # Validate config and exit
//! fleet-ledger --config /etc/fleet-ledger/config.toml --check
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use fleet_ledger::config::{default_config_path, AppConfig, ConfigError, CONFIG_ENV};
use fleet_ledger::domain::NewTrip;
use fleet_ledger::{init_tracing, FleetLedger};

#[derive(Parser, Debug)]
#[command(
    name = "fleet-ledger",
    version,
    about = "In-memory ledger for a delivery fleet",
    long_about = "Fleet Ledger: vehicles, drivers, trips, maintenance and fuel logs.\n\n\
                  Default config: ~/.config/fleet-ledger/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print fleet-wide figures (default).
    Summary {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print all collections as JSON.
    Snapshot,
    /// Create, dispatch and complete a trip, then print the outcome.
    Simulate {
        #[arg(long, default_value = "v1")]
        vehicle: String,
        #[arg(long, default_value = "d6")]
        driver: String,
        /// Cargo weight in kg.
        #[arg(long, default_value_t = 1000.0)]
        cargo: f64,
        /// Distance driven in km; added to the vehicle odometer.
        #[arg(long, default_value_t = 100.0)]
        distance: f64,
        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let (mut config, load_error) = resolve_config(&config_path, cli.check)?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    if let Some(e) = load_error {
        error!(path = %config_path.display(), error = %e, "Failed to load config");
        error!("Using default configuration.");
    }
    info!(path = %config_path.display(), "Configuration ready");

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file    : {}", config_path.display());
        println!("   Log level      : {}", config.logging.level);
        println!("   Log format     : {}", config.logging.format);
        println!("   Demo data      : {}", config.ledger.seed_demo_data);
        println!("   Event capacity : {}", config.ledger.event_capacity);
        println!(
            "   License window : {} days",
            config.ledger.license_warning_days
        );
        return Ok(());
    }

    let ledger = FleetLedger::from_config(&config.ledger);

    match cli.command.unwrap_or(Command::Summary { json: false }) {
        Command::Summary { json } => print_summary(&ledger, json)?,
        Command::Snapshot => {
            println!("{}", serde_json::to_string_pretty(&ledger.snapshot())?);
        }
        Command::Simulate {
            vehicle,
            driver,
            cargo,
            distance,
            revenue,
        } => simulate(&ledger, vehicle, driver, cargo, distance, revenue)?,
    }

    Ok(())
}

/// Load the config file. Under `--check` a load failure is returned as is;
/// otherwise the defaults stand in and the error comes back for logging.
fn resolve_config(
    path: &Path,
    strict: bool,
) -> Result<(AppConfig, Option<ConfigError>), ConfigError> {
    match AppConfig::load(path) {
        Ok(config) => Ok((config, None)),
        Err(e) if strict => Err(e),
        Err(e) => Ok((AppConfig::default(), Some(e))),
    }
}

fn print_summary(ledger: &FleetLedger, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = ledger.fleet_summary();
    let performance = ledger.snapshot().fleet_performance();

    if json {
        let out = serde_json::json!({
            "summary": summary,
            "vehicles": performance,
            "drivers": ledger.driver_insights(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Fleet");
    for (status, n) in &summary.vehicles_by_status {
        println!("   {status:<10} {n}");
    }
    println!(
        "   Utilization {}% ({} of {} operational)",
        summary.utilization_rate, summary.active_fleet, summary.operational_vehicles
    );
    println!("   Pending cargo {}", summary.pending_cargo);
    println!("   Open maintenance {}", summary.open_maintenance);
    println!("   Expired licenses {}", summary.expired_licenses);
    println!();
    println!("Totals");
    println!("   Revenue      {:>12.2}", summary.total_revenue);
    println!(
        "   Fuel         {:>12.2} ({:.1} L)",
        summary.total_fuel_cost, summary.total_liters
    );
    println!("   Maintenance  {:>12.2}", summary.total_maintenance_cost);
    println!();
    println!(
        "{:<6}{:<10}{:>10}{:>10}{:>10}",
        "ID", "Name", "ROI %", "km/L", "$/km"
    );
    for p in performance {
        println!(
            "{:<6}{:<10}{:>10.2}{:>10.2}{:>10.2}",
            p.vehicle_id, p.name, p.roi, p.fuel_efficiency, p.cost_per_km
        );
    }
    Ok(())
}

fn simulate(
    ledger: &FleetLedger,
    vehicle_id: String,
    driver_id: String,
    cargo_weight_kg: f64,
    distance_km: f64,
    revenue: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = ledger.subscribe();

    let trip = ledger.create_trip(NewTrip {
        vehicle_id,
        driver_id,
        origin: "Depot".into(),
        destination: "Customer".into(),
        cargo_weight_kg,
        cargo_description: "Simulated load".into(),
        revenue,
        notes: String::new(),
    })?;
    info!(trip_id = %trip.id, "Simulating trip");

    let start = ledger
        .vehicle(&trip.vehicle_id)
        .map(|v| v.odometer_km)
        .unwrap_or_default();
    let dispatched = ledger.dispatch_trip(&trip.id);
    let completed = dispatched && ledger.complete_trip(&trip.id, start + distance_km);
    if !completed {
        error!(trip_id = %trip.id, dispatched, "Trip could not run to completion");
    }

    let out = serde_json::json!({
        "trip": ledger.trip(&trip.id),
        "vehicle": ledger.vehicle(&trip.vehicle_id),
        "driver": ledger.driver(&trip.driver_id),
        "events": events.drain(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn check_fails_on_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[logging]\nformat = \"xml\"\n");

        let err = resolve_config(&path, true).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "logging.format", .. }
        ));
    }

    #[test]
    fn check_fails_on_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "not toml = = =");

        let err = resolve_config(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn normal_run_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "not toml = = =");

        let (config, load_error) = resolve_config(&path, false).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(matches!(load_error, Some(ConfigError::Parse { .. })));
    }

    #[test]
    fn valid_file_loads_in_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[ledger]\nseed_demo_data = false\n");

        for strict in [true, false] {
            let (config, load_error) = resolve_config(&path, strict).unwrap();
            assert!(!config.ledger.seed_demo_data);
            assert!(load_error.is_none());
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let (config, load_error) = resolve_config(&path, true).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(load_error.is_none());
    }
}
