//! Infrastructure adapters for Tungsten Forge.
//!
//! This crate implements the ports defined in `forge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod resources;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemProcessRunner;
pub use resources::ResourceError;
