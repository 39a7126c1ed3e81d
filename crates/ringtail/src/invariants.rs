//! Debug assertion macros for ring buffer invariants.
//!
//! These are only active in debug builds (`#[cfg(debug_assertions)]`), so
//! there is zero overhead in release builds. `RingBuffer<E>` runs them on
//! every mutation and every catch-up read.

/// Assert that occupancy never exceeds capacity.
///
/// Used in: `push_slot()` after the write lands
macro_rules! debug_assert_occupancy_bounded {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "occupancy {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

/// Assert that the write cursor stays inside the slot range.
///
/// Used in: `push_slot()` after the cursor advances
macro_rules! debug_assert_cursor_in_range {
    ($pos:expr, $capacity:expr) => {
        debug_assert!(
            $pos < $capacity,
            "write cursor {} outside slot range [0, {})",
            $pos,
            $capacity
        )
    };
}

/// Assert that a completed rotation implies a full buffer.
///
/// Catch-up reads derive "occupancy at checkpoint time" from the rotation
/// count alone, so this implication must hold in every reachable state.
macro_rules! debug_assert_rotation_means_full {
    ($rotation:expr, $len:expr, $capacity:expr) => {
        debug_assert!(
            $rotation == 0 || $len == $capacity,
            "rotation {} recorded while only {} of {} slots are occupied",
            $rotation,
            $len,
            $capacity
        )
    };
}

/// Assert catch-up accounting: returned plus overwritten equals the window.
///
/// Used in: `read_from_checkpoint()` before the report is handed out
macro_rules! debug_assert_catchup_accounting {
    ($returned:expr, $reused:expr, $max:expr) => {
        debug_assert!(
            $returned + $reused == $max,
            "catch-up accounting broken: returned {} + reused {} != max {}",
            $returned,
            $reused,
            $max
        )
    };
}

pub(crate) use debug_assert_catchup_accounting;
pub(crate) use debug_assert_cursor_in_range;
pub(crate) use debug_assert_occupancy_bounded;
pub(crate) use debug_assert_rotation_means_full;
