//! Booking operations: the reservation-admission path and lifecycle ops.
//!
//! Each operation pairs an options struct with an `execute` function taking
//! the store (and, for booking, the admission gate). The booking operation
//! composes four independent safety layers:
//!
//! 1. the in-process [`crate::AdmissionGate`] (fairness and contention
//!    bounding, per resource),
//! 2. the locked read inside an `IMMEDIATE` transaction (correctness across
//!    connections and processes),
//! 3. the versioned write (stale mutations rejected),
//! 4. the slot-uniqueness index (storage-level last resort).
//!
//! The layers are deliberately redundant; each covers a deployment topology
//! the others do not. Callers see a single typed outcome per attempt, with
//! every conflict layer collapsed into [`crate::Error::SlotConflict`].
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::booking::{book, BookOptions};
//! use slotbook::store::{Store, StoreConfig};
//! use slotbook::{AdmissionGate, RequesterId, ResourceId, Timeslot};
//!
//! let mut store = Store::open(StoreConfig::new("/tmp/slotbook.db")).unwrap();
//! let gate = AdmissionGate::new();
//!
//! let options = BookOptions::new(
//!     ResourceId::new(7),
//!     RequesterId::new("alice").unwrap(),
//!     Timeslot::from_rfc3339("2027-02-07T10:00:00Z").unwrap(),
//! );
//!
//! match book::execute(&mut store, &gate, &options) {
//!     Ok(reservation) => println!("booked {}", reservation.id()),
//!     Err(e) if e.is_conflict() => println!("slot taken"),
//!     Err(e) => eprintln!("booking failed: {e}"),
//! }
//! ```

pub mod book;
pub mod cancel;
pub mod confirm;
pub mod list;
pub mod outcome;

pub use book::BookOptions;
pub use cancel::CancelOptions;
pub use confirm::ConfirmOptions;
pub use list::ListOptions;
pub use outcome::{OutcomeOptions, SlotOutcome};
