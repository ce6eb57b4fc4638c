//! Routing finished buffers to home/lock surfaces.

/// Target to flag mapping and the writer capability.
pub mod dispatch;
/// Built-in writers (PNG directory, in-memory).
pub mod writer;
