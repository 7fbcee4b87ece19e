//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the build pipeline needs from the outside world.
//! The `forge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ProcessInvocation, ProcessOutput};
use crate::error::ForgeResult;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices, dangling links.
    Other,
}

/// One direct child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `forge_adapters::filesystem::LocalFilesystem` (production)
/// - `forge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Errors are reported as `ApplicationError::{FileRead, FileWrite,
/// Filesystem}` carrying the OS message.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Kind of the entry at `path`, or `None` if nothing is there.
    fn entry_kind(&self, path: &Path) -> ForgeResult<Option<EntryKind>>;

    /// Direct children of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> ForgeResult<Vec<DirEntry>>;

    fn read_to_string(&self, path: &Path) -> ForgeResult<String>;

    /// Write a whole file. A failed write must not leave a partial file.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Recursively copy `from` into `to`, overwriting existing files.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> ForgeResult<()>;

    /// Copy one file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()>;

    /// Absolute form of `path`, canonical when it exists.
    fn absolute(&self, path: &Path) -> ForgeResult<PathBuf>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for running external tools.
///
/// Implemented by `forge_adapters::process::SystemProcessRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion and capture its output.
    ///
    /// A non-zero exit is not an error here; only a failure to start is.
    fn run(&self, invocation: &ProcessInvocation) -> ForgeResult<ProcessOutput>;
}
