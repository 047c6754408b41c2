//! Stack growth for recursion whose depth follows the input's nesting.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, switching to a fresh heap-allocated stack segment first when the
/// current one is nearly exhausted.
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
