//! Filesystem access and file materialization
//!
//! This module provides:
//! - The `FileSystem` seam with a real (`LocalFs`) and in-memory (`MemoryFs`) implementation
//! - The `Materializer` that writes rendered artifacts

pub mod filesystem;
pub mod materializer;

pub use filesystem::{FileSystem, LocalFs, MemoryFs};
pub use materializer::{Materializer, WriteOutcome};
