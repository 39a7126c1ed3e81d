//! RingTail - Fixed-Capacity Overwrite-On-Full Ring Buffer
//!
//! A ring buffer for the "only the most recent N matter" use case: recent
//! log lines, recent events, recent messages. Producers keep pushing and
//! never block on slow consumers; once the buffer fills, each push
//! overwrites the oldest element. Consumers either read the newest/oldest
//! elements directly, or take a [`Checkpoint`] and catch up incrementally
//! in small paginated reads, with an explicit [`Missing`] report of how
//! many elements were lost to overwriting in the meantime.
//!
//! # Key Features
//!
//! - Overwrite-on-full: O(1) pushes that never fail, batch pushes under one
//!   lock acquisition
//! - One reader-writer lock over the whole structure: concurrent readers,
//!   exclusive writers, every operation a single acquisition
//! - Checkpoints are plain `Copy` values, cheap to take and valid forever
//! - Eviction-transparent catch-up reads: `returned + reused == max`, always
//! - Optional relaxed-atomic operation counters (`Config::enable_metrics`)
//!
//! # Example
//!
//! ```
//! use ringtail_rs::RingBuffer;
//!
//! let buffer = RingBuffer::new(4).unwrap();
//! buffer.push_many([1, 2, 3]);
//! assert_eq!(buffer.read_new(2), vec![3, 2]);
//!
//! let checkpoint = buffer.checkpoint();
//! buffer.push_many([4, 5, 6]);
//! assert_eq!(buffer.items_since(checkpoint), 3);
//!
//! // Catch up on what existed at checkpoint time: 3 is still retained,
//! // 1 and 2 were already overwritten.
//! let (items, missing) = buffer.read_from_checkpoint(checkpoint, 0, 4);
//! assert_eq!(items, vec![3]);
//! assert_eq!((missing.reused, missing.max), (2, 3));
//! ```

mod checkpoint;
mod config;
mod invariants;
mod metrics;
mod ring;

pub use checkpoint::{Checkpoint, Missing};
pub use config::Config;
pub use metrics::MetricsSnapshot;
pub use ring::{BufferError, RingBuffer};
