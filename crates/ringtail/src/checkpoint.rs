/// Opaque snapshot of the buffer's cursor state.
///
/// Capture one with `RingBuffer::checkpoint`, then hand it back to
/// `items_since` or `read_from_checkpoint` at any later time. A checkpoint
/// never pins buffer contents: the buffer keeps overwriting underneath it,
/// and catch-up reads report how much of the referenced history fell out of
/// the retention window.
///
/// The default checkpoint points at the state before the first push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub(crate) pos: usize,
    pub(crate) rotation: u64,
}

impl Checkpoint {
    /// Absolute sequence number encoded by this checkpoint: the count of
    /// elements ever written at capture time, independent of eviction.
    #[inline]
    pub(crate) fn abs(self, capacity: usize) -> u64 {
        self.rotation * capacity as u64 + self.pos as u64
    }
}

/// Accounting report for a catch-up read.
///
/// `max` is how many elements fell inside the checkpoint's historical window
/// after skipping; `reused` is how many of those have since been overwritten.
/// The read returns exactly `max - reused` elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Missing {
    /// Requested elements already overwritten and unrecoverable.
    pub reused: usize,
    /// Requested elements inside the checkpoint's window, before eviction.
    pub max: usize,
}

impl Missing {
    /// Number of elements the read actually produced.
    #[inline]
    pub fn returned(&self) -> usize {
        self.max - self.reused
    }
}
