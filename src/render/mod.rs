//! CPU compositing of a resolved placement into a destination buffer.

/// Destination buffer construction.
pub mod compose;
pub(crate) mod resample;
