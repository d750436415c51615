//! Init command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};

/// Initialize the data directory and database.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Opening the store creates the file and schema as needed.
        let mut store = open_store(global)?;
        store.verify_integrity()?;

        let config = load_configuration(global)?;
        if !global.quiet {
            println!("initialized {}", config.store_path()?.display());
        }
        Ok(())
    }
}
