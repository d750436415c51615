//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    BookCommand, CancelCommand, ConfirmCommand, InitCommand, ListCommand, ResourceCommand,
};

/// Book exclusive time slots against shared resources.
#[derive(Parser)]
#[command(name = "slotbook", version, about)]
pub struct Cli {
    /// Override the data directory location
    #[arg(long, global = true, value_name = "DIR", env = "SLOTBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the storage lock wait bound (milliseconds)
    #[arg(long, global = true, value_name = "MS")]
    pub busy_timeout: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),
    /// Book a time slot on a resource
    Book(BookCommand),
    /// Cancel a reservation
    Cancel(CancelCommand),
    /// Confirm a scheduled reservation
    Confirm(ConfirmCommand),
    /// List a requester's reservations
    List(ListCommand),
    /// Manage the resource directory
    Resource(ResourceCommand),
}
