/// Configuration for a `RingBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots; fixed for the life of the buffer.
    pub capacity: usize,
    /// Enable operation counters (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration with custom settings.
    pub const fn new(capacity: usize, enable_metrics: bool) -> Self {
        Self {
            capacity,
            enable_metrics,
        }
    }
}
