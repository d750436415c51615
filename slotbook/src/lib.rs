#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # slotbook
//!
//! A library for booking exclusive time slots against shared resources.
//!
//! slotbook guarantees that no two requesters ever hold an active
//! reservation for the same (resource, timeslot) pair, even under heavy
//! concurrent load and across multiple processes sharing one database file.
//! The admission path composes four independent safety layers: an
//! in-process keyed FIFO gate, a locked existence read inside an immediate
//! transaction, versioned writes, and a storage-level uniqueness index.
//!
//! ## Core Types
//!
//! - [`Resource`] and [`ResourceId`]: the schedulable entities
//! - [`Reservation`], [`Timeslot`] and [`ReservationStatus`]: booking
//!   records and their lifecycle
//! - [`AdmissionGate`]: the in-process exclusion primitive
//! - [`Store`]: the SQLite-backed reservation store
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use slotbook::{ReservationStatus, RequesterId, Timeslot};
//!
//! // Timeslots are second-truncated UTC instants.
//! let slot = Timeslot::from_rfc3339("2027-02-07T10:00:00Z").unwrap();
//! assert_eq!(format!("{slot}"), "2027-02-07T10:00:00Z");
//!
//! // Cancellation frees a slot; a completed slot stays occupied.
//! assert!(!ReservationStatus::Cancelled.occupies_slot());
//! assert!(ReservationStatus::Completed.occupies_slot());
//!
//! let requester = RequesterId::new("alice").unwrap();
//! assert_eq!(requester.as_str(), "alice");
//! ```

pub mod booking;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod reservation;
pub mod resource;
pub mod store;

// Re-export key types at crate root for convenience
pub use booking::{
    BookOptions, CancelOptions, ConfirmOptions, ListOptions, OutcomeOptions, SlotOutcome,
};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use gate::{AdmissionGate, GatePermit};
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::{
    Reservation, ReservationId, ReservationStatus, RequesterId, Timeslot,
};
pub use resource::{Resource, ResourceId};
pub use store::{Store, StoreConfig};
