//! In-process admission gate for serializing booking attempts.
//!
//! The gate keeps one FIFO wait queue per resource, created lazily the first
//! time a resource is booked and kept for the life of the process. Booking
//! attempts on the same resource are granted strictly in arrival order;
//! attempts on different resources never wait on each other.
//!
//! The gate is a throughput and fairness mechanism only. It provides no
//! guarantee across processes sharing one database file; cross-process
//! correctness rests on the store's locked read, versioned writes and
//! uniqueness index.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::resource::ResourceId;

/// Locks a mutex, recovering the guard if a holder panicked.
///
/// The queue state stays consistent across a poisoned lock: tickets are only
/// mutated under the guard, and a permit dropped during unwind still removes
/// its ticket.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// FIFO wait state for a single resource key.
#[derive(Debug, Default)]
struct WaitQueue {
    /// Waiting tickets in arrival order; the front ticket holds the gate.
    waiters: VecDeque<u64>,
    /// Next ticket number to hand out.
    next_ticket: u64,
}

#[derive(Debug, Default)]
struct GateSlot {
    queue: Mutex<WaitQueue>,
    granted: Condvar,
}

/// Keyed FIFO exclusion for booking attempts.
///
/// Created once at process start and shared (typically behind an [`Arc`])
/// by everything that books against the same store.
///
/// # Examples
///
/// ```
/// use slotbook::{AdmissionGate, ResourceId};
///
/// let gate = AdmissionGate::new();
/// let permit = gate.acquire(ResourceId::new(7));
/// // ... check and insert under the permit ...
/// drop(permit); // released on every exit path via Drop
/// ```
#[derive(Debug, Default)]
pub struct AdmissionGate {
    slots: Mutex<HashMap<ResourceId, Arc<GateSlot>>>,
}

impl AdmissionGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the wait-queue entry for a key, creating it on first use.
    fn slot(&self, key: ResourceId) -> Arc<GateSlot> {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry(key).or_default())
    }

    /// Blocks until the gate for `key` is free, then returns a permit.
    ///
    /// Waiters on the same key are granted the gate in first-come order.
    /// Unrelated keys are fully independent.
    #[must_use]
    pub fn acquire(&self, key: ResourceId) -> GatePermit {
        let slot = self.slot(key);
        let mut queue = lock(&slot.queue);
        let ticket = queue.push_waiter();
        while queue.waiters.front() != Some(&ticket) {
            queue = slot
                .granted
                .wait(queue)
                .unwrap_or_else(PoisonError::into_inner);
        }
        drop(queue);
        GatePermit { slot, key, ticket }
    }

    /// Bounded-wait variant of [`AdmissionGate::acquire`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemporarilyUnavailable`] if the gate was not granted
    /// within `timeout`. The caller may retry with backoff.
    pub fn acquire_for(&self, key: ResourceId, timeout: Duration) -> Result<GatePermit> {
        let slot = self.slot(key);
        let deadline = Instant::now() + timeout;
        let mut queue = lock(&slot.queue);
        let ticket = queue.push_waiter();
        while queue.waiters.front() != Some(&ticket) {
            let now = Instant::now();
            if now >= deadline {
                queue.waiters.retain(|&t| t != ticket);
                drop(queue);
                // Whoever is now at the front may have been waiting on us.
                slot.granted.notify_all();
                return Err(Error::TemporarilyUnavailable {
                    details: format!(
                        "gave up waiting for resource {key} after {}ms",
                        timeout.as_millis()
                    ),
                });
            }
            let (guard, _) = slot
                .granted
                .wait_timeout(queue, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            queue = guard;
        }
        drop(queue);
        Ok(GatePermit { slot, key, ticket })
    }

    /// Returns the number of tickets queued on `key`, holder included.
    ///
    /// Zero means the gate is free. Intended for diagnostics and tests.
    #[must_use]
    pub fn queue_depth(&self, key: ResourceId) -> usize {
        let slots = lock(&self.slots);
        slots.get(&key).map_or(0, |slot| {
            let queue = lock(&slot.queue);
            queue.waiters.len()
        })
    }
}

impl WaitQueue {
    fn push_waiter(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.waiters.push_back(ticket);
        ticket
    }
}

/// Scoped ownership of the admission gate for one resource.
///
/// Dropping the permit releases the gate and wakes the next waiter, so the
/// release runs on every exit path, including error returns and panics.
#[derive(Debug)]
pub struct GatePermit {
    slot: Arc<GateSlot>,
    key: ResourceId,
    ticket: u64,
}

impl GatePermit {
    /// Returns the resource this permit covers.
    #[must_use]
    pub const fn key(&self) -> ResourceId {
        self.key
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        let mut queue = lock(&self.slot.queue);
        if queue.waiters.front() == Some(&self.ticket) {
            queue.waiters.pop_front();
        } else {
            // Unreachable in practice: a permit only exists at the front.
            queue.waiters.retain(|&t| t != self.ticket);
        }
        drop(queue);
        self.slot.granted.notify_all();
    }
}
