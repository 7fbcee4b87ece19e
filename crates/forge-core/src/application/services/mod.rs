//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "find the project file" or "build the project".

pub mod build_service;
pub mod locate_service;
pub mod render_service;

pub use build_service::{BuildService, BuildSettings};
pub use locate_service::ProjectLocator;
pub use render_service::RenderService;
