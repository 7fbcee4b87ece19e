//! Application layer for Tungsten Forge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (BuildService, ProjectLocator, RenderService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Descriptor and layout rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{BuildService, BuildSettings, ProjectLocator, RenderService};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, EntryKind, Filesystem, ProcessRunner};

pub use error::{ApplicationError, LocateError};
