//! Cancel command implementation.

use clap::Args;
use slotbook::booking::cancel;
use slotbook::{CancelOptions, RequesterId, ReservationId};

use crate::error::CliError;
use crate::utils::{open_store, print_reservation, GlobalOptions, OutputFormat};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation identifier
    #[arg(long, value_name = "ID")]
    pub reservation: i64,

    /// Requester identity; must be the reservation's owner
    #[arg(long, value_name = "REQUESTER", env = "SLOTBOOK_REQUESTER")]
    pub requester: String,

    /// The version last observed, for detecting concurrent changes
    #[arg(long, value_name = "VERSION")]
    pub expected_version: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;

        let requester = RequesterId::new(self.requester)
            .map_err(|e| CliError::Library(slotbook::Error::from(e)))?;

        let options = CancelOptions::new(ReservationId::new(self.reservation), requester)
            .with_expected_version(self.expected_version);

        let cancelled = cancel::execute(&mut store, &options)?;
        match self.format {
            OutputFormat::Human => {
                if !global.quiet {
                    println!("cancelled {}", cancelled.id());
                }
                Ok(())
            }
            OutputFormat::Json => print_reservation(&cancelled, self.format),
        }
    }
}
