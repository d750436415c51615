//! Command implementations for the slotbook CLI.

mod book;
mod cancel;
mod confirm;
mod init;
mod list;
mod resource;

pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use confirm::ConfirmCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use resource::ResourceCommand;
