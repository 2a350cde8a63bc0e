//! Snapshot persistence

pub mod writer;

pub use writer::*;
