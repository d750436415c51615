//! Utility functions for CLI operations.
//!
//! This module provides common helpers used across CLI commands: global
//! options, store opening through the configuration system and output
//! formatting.

use std::path::PathBuf;

use clap::ValueEnum;
use slotbook::{Config, ConfigBuilder, Reservation, Resource, Store, StoreConfig};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the storage lock wait bound (in milliseconds).
    pub busy_timeout: Option<u64>,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented, script-friendly output.
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Loads the merged configuration with global options applied on top.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        data_dir: global.data_dir.clone(),
        busy_timeout_ms: global.busy_timeout,
        gate_wait_ms: None,
    };

    ConfigBuilder::new()
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Opens the store at the configured location.
pub fn open_store(global: &GlobalOptions) -> Result<Store, CliError> {
    let config = load_configuration(global)?;
    let path = config.store_path()?;
    let store_config = StoreConfig::new(path).with_busy_timeout(config.busy_timeout());
    Ok(Store::open(store_config)?)
}

/// Prints a single reservation.
///
/// Human output prints just the reservation id, so scripts can capture it.
pub fn print_reservation(reservation: &Reservation, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Human => println!("{}", reservation.id()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(reservation)
                .map_err(|e| CliError::Config(e.to_string()))?
        ),
    }
    Ok(())
}

/// Prints a list of reservations.
pub fn print_reservations(
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Human => {
            for r in reservations {
                println!(
                    "{}\t{}\t{}\t{}\tv{}",
                    r.id(),
                    r.resource_id(),
                    r.timeslot(),
                    r.status(),
                    r.version()
                );
            }
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(reservations)
                .map_err(|e| CliError::Config(e.to_string()))?
        ),
    }
    Ok(())
}

/// Prints a list of resources.
pub fn print_resources(resources: &[Resource], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Human => {
            for r in resources {
                println!(
                    "{}\t{}\t{}",
                    r.id(),
                    r.name(),
                    if r.available() { "available" } else { "offline" }
                );
            }
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(resources).map_err(|e| CliError::Config(e.to_string()))?
        ),
    }
    Ok(())
}
