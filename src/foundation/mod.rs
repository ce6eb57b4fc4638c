/// Shared value types: canvas, pixel buffers, layout modes and targets.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
