// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Tungsten Forge.
//!
//! Pure build-pipeline logic. All filesystem and process concerns are
//! handled via ports (traits) defined in the application layer.
//!
//! - **No I/O**: descriptor parsing, replacement and path layout are pure
//! - **Closed sets**: build variables and pipeline stages are plain enums
//! - **Opaque values**: descriptor fields are forwarded, never interpreted
//!
// Public API - what the world sees
pub mod diagnostics;
pub mod entities;
pub mod error;
pub mod replacements;
pub mod value_objects;

// Re-exports for convenience
pub use diagnostics::{BuildLog, LogEntry, LogLevel};
pub use entities::{
    descriptor::{DESCRIPTOR_EXTENSION, ProjectDescriptor},
    layout::{COMPONENT_TYPES_FILE, RenderJob, WorkspaceLayout},
    report::BuildReport,
    variables::{Var, VariableStore},
};
pub use error::{DomainError, ErrorCategory};
pub use replacements::ReplacementSet;
pub use value_objects::{ProcessInvocation, ProcessOutput, ProcessStep, Stage};
