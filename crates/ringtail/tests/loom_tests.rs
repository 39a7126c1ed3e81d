//! Loom-based concurrency tests.
//!
//! Run with: `cargo test --features loom --test loom_tests --release`
//!
//! Loom exhaustively explores all possible thread interleavings. The
//! buffer's whole protocol is a single reader-writer lock, so the model
//! here is a reduced copy of the cursor state under `loom::sync::RwLock`,
//! checked for cursor monotonicity and catch-up accounting under every
//! schedule.

#![cfg(feature = "loom")]

use loom::sync::{Arc, RwLock};
use loom::thread;

const CAPACITY: usize = 2;

#[derive(Clone, Copy)]
struct Cursor {
    pos: usize,
    rotation: u64,
}

impl Cursor {
    fn abs(self) -> u64 {
        self.rotation * CAPACITY as u64 + self.pos as u64
    }
}

/// Reduced model of the buffer: same cursor rules, untyped u64 payloads.
struct LoomRing {
    state: RwLock<(Vec<u64>, Cursor)>,
}

impl LoomRing {
    fn new() -> Self {
        Self {
            state: RwLock::new((
                Vec::with_capacity(CAPACITY),
                Cursor {
                    pos: 0,
                    rotation: 0,
                },
            )),
        }
    }

    fn push(&self, value: u64) {
        let mut guard = self.state.write().unwrap();
        let (slots, cursor) = &mut *guard;
        if cursor.pos < slots.len() {
            slots[cursor.pos] = value;
        } else {
            slots.push(value);
        }
        if cursor.pos + 1 == CAPACITY {
            cursor.rotation += 1;
        }
        cursor.pos = (cursor.pos + 1) % CAPACITY;
    }

    fn checkpoint(&self) -> Cursor {
        self.state.read().unwrap().1
    }

    /// Returns (survivors newest-first, reused, max).
    fn catch_up(&self, checkpoint: Cursor, n: usize) -> (Vec<u64>, usize, usize) {
        let guard = self.state.read().unwrap();
        let (slots, cursor) = &*guard;

        let current_abs = cursor.abs();
        let checkpoint_abs = checkpoint.abs();
        if checkpoint_abs > current_abs {
            return (Vec::new(), 0, 0);
        }

        let available = if checkpoint.rotation == 0 {
            checkpoint.pos
        } else {
            CAPACITY
        };
        let max = n.min(available);
        let oldest_valid = current_abs - slots.len() as u64;

        let mut out = Vec::new();
        let mut reused = 0;
        for i in 0..max {
            let target = checkpoint_abs - (1 + i) as u64;
            if target < oldest_valid {
                reused += 1;
            } else {
                out.push(slots[(target % CAPACITY as u64) as usize]);
            }
        }
        (out, reused, max)
    }
}

#[test]
fn loom_pusher_vs_checkpoint_reader() {
    loom::model(|| {
        let ring = Arc::new(LoomRing::new());
        let writer = Arc::clone(&ring);

        let pusher = thread::spawn(move || {
            writer.push(1);
            writer.push(2);
            writer.push(3);
        });

        // Whatever the schedule, accounting must balance and the cursor
        // must only move forward.
        let first = ring.checkpoint().abs();
        let checkpoint = ring.checkpoint();
        let (out, reused, max) = ring.catch_up(checkpoint, CAPACITY);
        assert_eq!(out.len() + reused, max);
        let second = ring.checkpoint().abs();
        assert!(second >= first);

        pusher.join().unwrap();

        let checkpoint = ring.checkpoint();
        assert_eq!(checkpoint.abs(), 3);
        let (out, reused, max) = ring.catch_up(checkpoint, CAPACITY);
        assert_eq!(out, vec![3, 2]);
        assert_eq!(reused, 0);
        assert_eq!(max, 2);
    });
}

#[test]
fn loom_two_pushers_interleave() {
    loom::model(|| {
        let ring = Arc::new(LoomRing::new());
        let a = Arc::clone(&ring);
        let b = Arc::clone(&ring);

        let writer_a = thread::spawn(move || a.push(10));
        let writer_b = thread::spawn(move || b.push(20));
        writer_a.join().unwrap();
        writer_b.join().unwrap();

        // Both writes land; only their order differs by schedule.
        let checkpoint = ring.checkpoint();
        assert_eq!(checkpoint.abs(), 2);
        let (out, reused, max) = ring.catch_up(checkpoint, CAPACITY);
        assert_eq!(max, 2);
        assert_eq!(reused, 0);
        assert!(out == vec![20, 10] || out == vec![10, 20]);
    });
}
