//! Forge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Tungsten
//! project build orchestrator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            forge-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (BuildService, ProjectLocator, Render)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (Driven: Filesystem, ProcessRunner)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     forge-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemProcessRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (VariableStore, ProjectDescriptor,      │
//! │  ReplacementSet, WorkspaceLayout)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use forge_core::prelude::*;
//! # fn adapters() -> (Arc<dyn Filesystem>, Arc<dyn ProcessRunner>) { unimplemented!() }
//!
//! let (filesystem, runner) = adapters();
//! let mut service = BuildService::new(filesystem, runner, BuildSettings::default());
//! service.set_var(Var::ProjectPath, "games/demo");
//! service.set_var(Var::EngineDir, "engine");
//! service.set_var(Var::IntDir, "games/demo/int");
//! service.set_var(Var::BuildDir, "games/demo/bin");
//!
//! if !service.build() {
//!     for entry in service.log().errors() {
//!         eprintln!("{entry}");
//!     }
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, BuildService, BuildSettings, LocateError, ProjectLocator,
        RenderService,
        ports::{DirEntry, EntryKind, Filesystem, ProcessRunner},
    };
    pub use crate::domain::{
        BuildLog, BuildReport, DomainError, LogEntry, LogLevel, ProcessInvocation, ProcessOutput,
        ProcessStep, ProjectDescriptor, ReplacementSet, Stage, Var, VariableStore,
        WorkspaceLayout,
    };
    pub use crate::error::{ErrorCategory, ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
