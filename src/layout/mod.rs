/// Per-mode placement of a source inside a destination.
pub mod resolver;
