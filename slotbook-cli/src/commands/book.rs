//! Book command implementation.

use std::time::Duration;

use clap::Args;
use slotbook::booking::book;
use slotbook::{AdmissionGate, BookOptions, RequesterId, ResourceId, Timeslot};

use crate::error::CliError;
use crate::utils::{open_store, print_reservation, GlobalOptions, OutputFormat};

/// Book a time slot on a resource.
#[derive(Args)]
pub struct BookCommand {
    /// Resource identifier
    #[arg(long, value_name = "ID")]
    pub resource: i64,

    /// Requester identity
    #[arg(long, value_name = "REQUESTER", env = "SLOTBOOK_REQUESTER")]
    pub requester: String,

    /// Timeslot as an RFC 3339 timestamp, e.g. 2026-02-07T10:00:00Z
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: String,

    /// Free-text note attached to the reservation
    #[arg(long, value_name = "NOTE")]
    pub note: Option<String>,

    /// Give up after waiting this long for the admission gate (milliseconds)
    #[arg(long, value_name = "MS")]
    pub wait: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        // Each CLI invocation is its own process; cross-process exclusion
        // comes from the store, the gate covers in-process callers.
        let gate = AdmissionGate::new();

        let requester = RequesterId::new(self.requester)
            .map_err(|e| CliError::Library(slotbook::Error::from(e)))?;
        let timeslot = Timeslot::from_rfc3339(&self.at)
            .map_err(|e| CliError::Library(slotbook::Error::from(e)))?;

        let options = BookOptions::new(ResourceId::new(self.resource), requester, timeslot)
            .with_note(self.note)
            .with_wait_timeout(self.wait.map(Duration::from_millis));

        let reservation = book::execute(&mut store, &gate, &options)?;
        print_reservation(&reservation, self.format)
    }
}
