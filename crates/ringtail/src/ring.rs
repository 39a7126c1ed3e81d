use crate::checkpoint::{Checkpoint, Missing};
use crate::invariants::{
    debug_assert_catchup_accounting, debug_assert_cursor_in_range, debug_assert_occupancy_bounded,
    debug_assert_rotation_means_full,
};
use crate::metrics::Metrics;
use crate::{Config, MetricsSnapshot};
use parking_lot::RwLock;
use thiserror::Error;

/// Error types for buffer construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Capacity must be at least one slot; everything downstream divides by it.
    #[error("ring capacity must be non-zero")]
    ZeroCapacity,
}

/// Fixed-capacity, overwrite-on-full ring buffer.
///
/// Once full, each push overwrites the oldest element; the producer never
/// blocks on slow consumers beyond lock hold times. Consumers read the
/// newest or oldest elements directly, or take a [`Checkpoint`] and catch up
/// later with an explicit report of what was lost to overwriting.
///
/// All operations take `&self`: the whole structure sits behind a single
/// reader-writer lock, so writers are exclusive and readers run
/// concurrently. Every call is one lock acquisition; there is no atomicity
/// across calls, which is exactly the gap checkpoints exist to tolerate.
#[derive(Debug)]
pub struct RingBuffer<E> {
    config: Config,
    metrics: Metrics,
    state: RwLock<State<E>>,
}

/// Cursor state and storage, only touched under the lock.
#[derive(Debug)]
struct State<E> {
    /// Occupied slots. Grows by push until it reaches capacity, then slots
    /// are overwritten in place; `slots.len()` is the current occupancy.
    slots: Vec<E>,
    /// Next write index, in `[0, capacity)`.
    pos: usize,
    /// Completed wrap-arounds of `pos` back to slot 0.
    rotation: u64,
}

impl<E> State<E> {
    /// Count of elements ever written: `rotation * capacity + pos`.
    #[inline]
    fn abs(&self, capacity: usize) -> u64 {
        self.rotation * capacity as u64 + self.pos as u64
    }
}

impl<E> RingBuffer<E> {
    // ---------------------------------------------------------------------
    // CONSTRUCTION & STATUS
    // ---------------------------------------------------------------------

    /// Creates a buffer with the given fixed capacity and metrics disabled.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        Self::with_config(Config::new(capacity, false))
    }

    /// Creates a buffer from a full configuration.
    pub fn with_config(config: Config) -> Result<Self, BufferError> {
        if config.capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }

        Ok(Self {
            config,
            metrics: Metrics::new(),
            state: RwLock::new(State {
                slots: Vec::with_capacity(config.capacity),
                pos: 0,
                rotation: 0,
            }),
        })
    }

    /// Returns the fixed slot count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Returns how many elements are currently stored, up to the capacity.
    pub fn len(&self) -> usize {
        self.state.read().slots.len()
    }

    /// Returns true if nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---------------------------------------------------------------------
    // PRODUCER API
    // ---------------------------------------------------------------------

    /// Pushes one element, overwriting the oldest if the buffer is full.
    pub fn push(&self, item: E) {
        let mut state = self.state.write();
        let evicted = Self::push_slot(&mut state, self.config.capacity, item);
        drop(state);

        if self.config.enable_metrics {
            self.metrics.add_pushed(1);
            if evicted {
                self.metrics.add_evicted(1);
            }
        }
    }

    /// Pushes every element of `items` in order under one exclusive
    /// acquisition. Other callers observe either none or all of the batch;
    /// once started it always completes.
    pub fn push_many<I>(&self, items: I)
    where
        I: IntoIterator<Item = E>,
    {
        let mut state = self.state.write();
        let mut pushed = 0u64;
        let mut evicted = 0u64;
        for item in items {
            if Self::push_slot(&mut state, self.config.capacity, item) {
                evicted += 1;
            }
            pushed += 1;
        }
        drop(state);

        if self.config.enable_metrics {
            self.metrics.add_pushed(pushed);
            self.metrics.add_evicted(evicted);
        }
    }

    /// Writes `item` at the cursor and advances it. Returns whether an older
    /// element was overwritten.
    fn push_slot(state: &mut State<E>, capacity: usize, item: E) -> bool {
        let evicted = state.pos < state.slots.len();
        if evicted {
            state.slots[state.pos] = item;
        } else {
            // Still filling: the cursor tracks slots.len() until the first
            // wrap, so occupancy grows by exactly one per push.
            state.slots.push(item);
        }

        if state.pos + 1 == capacity {
            state.rotation += 1;
        }
        state.pos = (state.pos + 1) % capacity;

        debug_assert_occupancy_bounded!(state.slots.len(), capacity);
        debug_assert_cursor_in_range!(state.pos, capacity);
        debug_assert_rotation_means_full!(state.rotation, state.slots.len(), capacity);

        evicted
    }

    // ---------------------------------------------------------------------
    // CHECKPOINTS
    // ---------------------------------------------------------------------

    /// Captures the current cursor state as an opaque [`Checkpoint`].
    ///
    /// Cheap (one shared acquisition, two word copies) and safe to keep
    /// around forever: a checkpoint taken long ago simply references history
    /// that catch-up reads will report as overwritten.
    pub fn checkpoint(&self) -> Checkpoint {
        let state = self.state.read();
        Checkpoint {
            pos: state.pos,
            rotation: state.rotation,
        }
    }

    /// Returns how many elements were pushed after `checkpoint` was taken.
    ///
    /// The count is not capped by capacity: pushing 100 elements into a
    /// 4-slot buffer reports 100. A checkpoint ahead of this buffer (a
    /// handle from some other instance) counts as zero.
    pub fn items_since(&self, checkpoint: Checkpoint) -> u64 {
        let state = self.state.read();
        let current_abs = state.abs(self.config.capacity);
        current_abs.saturating_sub(checkpoint.abs(self.config.capacity))
    }

    /// Returns a snapshot of the operation counters, all zero unless the
    /// buffer was built with `enable_metrics`.
    pub fn metrics(&self) -> MetricsSnapshot {
        if self.config.enable_metrics {
            self.metrics.snapshot()
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl<E: Clone> RingBuffer<E> {
    // ---------------------------------------------------------------------
    // CONSUMER API
    // ---------------------------------------------------------------------

    /// Returns up to `n` of the newest elements, newest first.
    ///
    /// Fewer than `n` come back when the buffer holds fewer; never an error
    /// and never padding. Elements are owned clones sharing nothing with
    /// the buffer.
    pub fn read_new(&self, n: usize) -> Vec<E> {
        let state = self.state.read();
        let size = state.slots.len();
        let count = n.min(size);

        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            // Normalizing by occupancy rather than capacity is sound: below
            // capacity the occupied prefix is contiguous from slot 0, and at
            // capacity the two moduli coincide.
            out.push(state.slots[(size + state.pos - 1 - i) % size].clone());
        }

        if self.config.enable_metrics {
            self.metrics.add_reads(1);
        }
        out
    }

    /// Returns up to `n` of the oldest elements, oldest first.
    ///
    /// Same truncation semantics as [`read_new`](Self::read_new).
    pub fn read_old(&self, n: usize) -> Vec<E> {
        let state = self.state.read();
        let size = state.slots.len();
        let count = n.min(size);

        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            out.push(state.slots[(state.pos + i) % size].clone());
        }

        if self.config.enable_metrics {
            self.metrics.add_reads(1);
        }
        out
    }

    /// Catch-up read: returns up to `n` elements that existed when
    /// `checkpoint` was taken, newest first, after skipping the `skip`
    /// newest of them. Useful for paginating through history in small
    /// requests that never hold the lock for long.
    ///
    /// The [`Missing`] report makes eviction transparent: `max` elements
    /// fell inside the checkpoint's window after skipping, `reused` of them
    /// were already overwritten by later pushes, and the returned vector
    /// holds exactly `max - reused` elements.
    pub fn read_from_checkpoint(
        &self,
        checkpoint: Checkpoint,
        skip: usize,
        n: usize,
    ) -> (Vec<E>, Missing) {
        let capacity = self.config.capacity;
        let state = self.state.read();
        let size = state.slots.len();
        let current_abs = state.abs(capacity);
        let checkpoint_abs = checkpoint.abs(capacity);

        if self.config.enable_metrics {
            self.metrics.add_checkpoint_reads(1);
        }

        // A checkpoint sitting ahead of this buffer came from some other
        // instance; nothing it references can be here. Clamp to empty.
        if checkpoint_abs > current_abs {
            return (Vec::new(), Missing::default());
        }

        // Occupancy at capture time: before the first rotation it equals the
        // write cursor; any rotation means the buffer was already full.
        let available_at_checkpoint = if checkpoint.rotation == 0 {
            checkpoint.pos
        } else {
            capacity
        };
        let max = n.min(available_at_checkpoint.saturating_sub(skip));

        // Absolute position of the oldest element still retained right now.
        let oldest_valid_abs = current_abs - size as u64;

        let mut out = Vec::with_capacity(max);
        let mut reused = 0;
        for i in 0..max {
            // Bounded below by checkpoint_abs - available_at_checkpoint, so
            // the subtraction cannot underflow inside the window.
            let target_abs = checkpoint_abs - (1 + skip + i) as u64;
            if target_abs < oldest_valid_abs {
                reused += 1;
            } else {
                out.push(state.slots[(target_abs % capacity as u64) as usize].clone());
            }
        }

        debug_assert_catchup_accounting!(out.len(), reused, max);

        if self.config.enable_metrics {
            self.metrics.add_reused(reused as u64);
        }
        (out, Missing { reused, max })
    }
}
