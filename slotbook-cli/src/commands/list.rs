//! List command implementation.

use clap::Args;
use slotbook::booking::list;
use slotbook::{ListOptions, RequesterId};

use crate::error::CliError;
use crate::utils::{open_store, print_reservations, GlobalOptions, OutputFormat};

/// List a requester's reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Requester identity
    #[arg(long, value_name = "REQUESTER", env = "SLOTBOOK_REQUESTER")]
    pub requester: String,

    /// Only show upcoming active reservations
    #[arg(long)]
    pub upcoming: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let store = open_store(global)?;

        let requester = RequesterId::new(self.requester)
            .map_err(|e| CliError::Library(slotbook::Error::from(e)))?;

        let options = ListOptions::new(requester).with_upcoming(self.upcoming);
        let reservations = list::execute(&store, &options)?;
        print_reservations(&reservations, self.format)
    }
}
