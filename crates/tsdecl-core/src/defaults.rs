//! Walk defaults shared by configuration and the walker.

/// Module-declaration flag values that mark a `namespace`.
pub const DEFAULT_NAMESPACE_FLAGS: [i64; 2] = [16, 4098];

/// Module/namespace nesting depth below which bodies are no longer walked.
pub const DEFAULT_MAX_DEPTH: usize = 256;
