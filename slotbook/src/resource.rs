//! Resource types for the schedulable entities being booked.
//!
//! A resource is whatever a timeslot is booked against: a practitioner, a
//! room, a machine. The booking core only ever reads a resource's
//! availability flag; creating and editing resource records belongs to the
//! directory collaborator (see [`crate::store`] for its minimal surface).

use serde::{Deserialize, Serialize};

/// A unique identifier for a resource.
///
/// # Examples
///
/// ```
/// use slotbook::ResourceId;
///
/// let id = ResourceId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(format!("{id}"), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(i64);

impl ResourceId {
    /// Creates a resource identifier from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A schedulable resource record.
///
/// The availability flag is a point-in-time signal that the resource accepts
/// new reservations. It is read by the booking path inside the booking
/// transaction and may be flipped at any time by the directory collaborator;
/// flipping it never invalidates reservations that already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    name: String,
    detail: Option<String>,
    available: bool,
}

impl Resource {
    /// Assembles a resource from stored parts.
    #[must_use]
    pub(crate) fn from_parts(
        id: ResourceId,
        name: String,
        detail: Option<String>,
        available: bool,
    ) -> Self {
        Self {
            id,
            name,
            detail,
            available,
        }
    }

    /// Returns the resource identifier.
    #[must_use]
    pub const fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the resource's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional descriptive detail.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns whether the resource currently accepts new reservations.
    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
    }
}
