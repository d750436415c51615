//! Resource directory commands.
//!
//! These commands stand in for the external directory collaborator: they
//! seed resources and flip their availability flags. The booking core
//! itself never mutates the directory.

use clap::{Args, Subcommand};
use slotbook::{ResourceId, Store};

use crate::error::CliError;
use crate::utils::{open_store, print_resources, GlobalOptions, OutputFormat};

/// Manage the resource directory.
#[derive(Args)]
pub struct ResourceCommand {
    /// The directory action to perform
    #[command(subcommand)]
    pub action: ResourceAction,
}

/// Directory actions.
#[derive(Subcommand)]
pub enum ResourceAction {
    /// Register a new resource
    Add {
        /// Resource display name
        #[arg(long, value_name = "NAME")]
        name: String,

        /// Optional descriptive detail
        #[arg(long, value_name = "DETAIL")]
        detail: Option<String>,
    },
    /// List resources
    List {
        /// Only show resources accepting reservations
        #[arg(long)]
        available_only: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Flip whether a resource accepts new reservations
    SetAvailability {
        /// Resource identifier
        #[arg(long, value_name = "ID")]
        resource: i64,

        /// New availability state
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        available: bool,
    },
}

impl ResourceCommand {
    /// Execute the resource command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            ResourceAction::Add { name, detail } => {
                let mut store = open_store(global)?;
                let resource = store.insert_resource(&name, detail.as_deref())?;
                println!("{}", resource.id());
                Ok(())
            }
            ResourceAction::List {
                available_only,
                format,
            } => {
                let store = open_store(global)?;
                let resources = Store::list_resources(store.connection(), available_only)?;
                print_resources(&resources, format)
            }
            ResourceAction::SetAvailability {
                resource,
                available,
            } => {
                let mut store = open_store(global)?;
                let id = ResourceId::new(resource);
                let updated = store.set_resource_availability(id, available)?;
                if !updated {
                    return Err(CliError::Library(slotbook::Error::ResourceNotFound { id }));
                }
                if !global.quiet {
                    println!(
                        "resource {id} is now {}",
                        if available { "available" } else { "offline" }
                    );
                }
                Ok(())
            }
        }
    }
}
