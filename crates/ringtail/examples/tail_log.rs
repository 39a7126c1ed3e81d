//! A producer thread floods the buffer with log lines while a slower
//! consumer tails it through checkpoints, reporting what it recovered and
//! what was already overwritten.
//!
//! Run with: `cargo run --example tail_log`

use ringtail_rs::RingBuffer;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TOTAL_EVENTS: u64 = 1_000;

fn main() {
    let buffer = Arc::new(RingBuffer::new(64).unwrap());
    let start = buffer.checkpoint();

    let producer = {
        let buffer = Arc::clone(&buffer);
        thread::spawn(move || {
            for i in 0..TOTAL_EVENTS {
                buffer.push(format!("event #{i}"));
                if i % 100 == 0 {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
    };

    loop {
        thread::sleep(Duration::from_millis(5));
        let seen = buffer.items_since(start);

        // Page backward from "now": the newest 16 entries that still exist,
        // plus a count of those that were overwritten before we got here.
        let checkpoint = buffer.checkpoint();
        let (items, missing) = buffer.read_from_checkpoint(checkpoint, 0, 16);
        println!(
            "tail: {seen} events since start, page recovered {} of {}, {} already overwritten",
            items.len(),
            missing.max,
            missing.reused
        );

        if seen >= TOTAL_EVENTS {
            break;
        }
    }

    producer.join().unwrap();

    println!("newest entries: {:?}", buffer.read_new(4));
}
