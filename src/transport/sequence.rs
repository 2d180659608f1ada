//! Per-connection Sequence_Id generator.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::error::{TransportError, TransportResult};

/// Hands out Sequence_Ids 0, 1, 2, ... wrapping at `u32::MAX`.
///
/// Safe to share between any number of senders: each call to
/// [`next`](Self::next) receives a distinct value and no value is skipped.
/// After [`stop`](Self::stop) every call fails with
/// [`TransportError::SequenceStopped`] instead of blocking.
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    next: AtomicU32,
    stopped: AtomicBool,
}

impl SequenceGenerator {
    /// Create a generator whose first value is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next Sequence_Id.
    ///
    /// A call racing with `stop` either gets a valid value or fails; it
    /// never observes a value produced after the stop took effect.
    pub fn next(&self) -> TransportResult<u32> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(TransportError::SequenceStopped);
        }
        Ok(self.next.fetch_add(1, Ordering::AcqRel))
    }

    /// Stop producing values. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Value the next successful `next` call will return.
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Acquire)
    }

    #[cfg(test)]
    fn starting_at(value: u32) -> Self {
        Self {
            next: AtomicU32::new(value),
            stopped: AtomicBool::new(false),
        }
    }
}
