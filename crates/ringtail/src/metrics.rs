use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative operation counters.
///
/// All counters are relaxed atomics: they are monotone tallies for
/// monitoring, not part of the buffer's consistency protocol. Each counter
/// sits on its own cache line so a hot push path does not invalidate the
/// read-side counters.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    items_pushed: CachePadded<AtomicU64>,
    items_evicted: CachePadded<AtomicU64>,
    reads: CachePadded<AtomicU64>,
    checkpoint_reads: CachePadded<AtomicU64>,
    items_reused: CachePadded<AtomicU64>,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_pushed(&self, n: u64) {
        self.items_pushed.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_evicted(&self, n: u64) {
        self.items_evicted.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_reads(&self, n: u64) {
        self.reads.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_checkpoint_reads(&self, n: u64) {
        self.checkpoint_reads.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_reused(&self, n: u64) {
        self.items_reused.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            items_pushed: self.items_pushed.load(Ordering::Relaxed),
            items_evicted: self.items_evicted.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            checkpoint_reads: self.checkpoint_reads.load(Ordering::Relaxed),
            items_reused: self.items_reused.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the operation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total elements ever pushed.
    pub items_pushed: u64,
    /// Elements overwritten before any reader saw them leave.
    pub items_evicted: u64,
    /// Direct read calls (`read_new` / `read_old`).
    pub reads: u64,
    /// Checkpoint catch-up read calls.
    pub checkpoint_reads: u64,
    /// Elements reported as reused across all catch-up reads.
    pub items_reused: u64,
}
