//! Module: stats
//!
//! Purpose: lock-free capture accounting. The sink runs on the radio driver's
//! event path where logging and blocking are forbidden, so every per-record
//! condition (discard, truncation, write failure) is recorded here as an
//! atomic counter and reported later, off the hot path.
//!
//! Safety: Safe. All access via atomics, no locks.

use core::sync::atomic::{AtomicU32, Ordering};

/// Capture pipeline counters.
///
/// Counters saturate at `u32::MAX` rather than wrapping; a pegged counter is
/// still meaningful in a report, a wrapped one is not.
pub struct CaptureStats {
    received: AtomicU32,
    discarded: AtomicU32,
    emitted: AtomicU32,
    truncated: AtomicU32,
    write_failures: AtomicU32,
}

impl CaptureStats {
    pub const fn new() -> Self {
        Self {
            received: AtomicU32::new(0),
            discarded: AtomicU32::new(0),
            emitted: AtomicU32::new(0),
            truncated: AtomicU32::new(0),
            write_failures: AtomicU32::new(0),
        }
    }

    fn bump(counter: &AtomicU32) {
        let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
            Some(v.saturating_add(1))
        });
    }

    /// A record arrived from the driver (valid or not).
    #[inline]
    pub fn record_received(&self) {
        Self::bump(&self.received);
    }

    /// An invalid record was dropped without output.
    #[inline]
    pub fn record_discarded(&self) {
        Self::bump(&self.discarded);
    }

    /// One line was written to the transport.
    #[inline]
    pub fn record_emitted(&self) {
        Self::bump(&self.emitted);
    }

    /// A record's formatted line exceeded the line buffer and was suppressed.
    #[inline]
    pub fn record_truncated(&self) {
        Self::bump(&self.truncated);
    }

    /// The transport rejected a write; the record was lost, capture continues.
    #[inline]
    pub fn record_write_failure(&self) {
        Self::bump(&self.write_failures);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for CaptureStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub received: u32,
    pub discarded: u32,
    pub emitted: u32,
    pub truncated: u32,
    pub write_failures: u32,
}
