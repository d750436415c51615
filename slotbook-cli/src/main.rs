//! Main entry point for the slotbook CLI.
//!
//! This is the command-line interface for the slotbook reservation system.
//! It provides commands for booking and managing time slots:
//! - `init`: Initialize the data directory and database
//! - `book`: Book a time slot on a resource
//! - `cancel`: Cancel a reservation
//! - `confirm`: Confirm a scheduled reservation
//! - `list`: List a requester's reservations
//! - `resource`: Manage the resource directory

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route library log output to stderr at the requested verbosity.
    slotbook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Confirm(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Resource(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
