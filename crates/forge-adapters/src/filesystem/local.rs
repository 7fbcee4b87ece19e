//! Local filesystem adapter using std::fs.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;
use walkdir::WalkDir;

use forge_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::{ForgeError, ForgeResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn entry_kind(&self, path: &Path) -> ForgeResult<Option<EntryKind>> {
        // Follows symlinks, so a link to a .wproj counts as a file.
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(kind_of(meta.file_type()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "inspect")),
        }
    }

    fn read_dir(&self, path: &Path) -> ForgeResult<Vec<DirEntry>> {
        let entries = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        entries
            .map(|entry| {
                let entry = entry.map_err(|e| map_io_error(path, e, "read directory"))?;
                let entry_path = entry.path();
                let kind = match fs::metadata(&entry_path) {
                    Ok(meta) => kind_of(meta.file_type()),
                    // Dangling symlink.
                    Err(e) if e.kind() == io::ErrorKind::NotFound => EntryKind::Other,
                    Err(e) => return Err(map_io_error(&entry_path, e, "inspect")),
                };
                Ok(DirEntry::new(entry_path, kind))
            })
            .collect()
    }

    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        fs::read_to_string(path).map_err(|e| {
            ApplicationError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let write_error = |e: io::Error| -> ForgeError {
            ApplicationError::FileWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        };

        // Temp file in the destination directory, then rename over the target.
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
        tmp.write_all(content.as_bytes()).map_err(write_error)?;
        tmp.flush().map_err(write_error)?;
        tmp.persist(path).map_err(|e| write_error(e.error))?;

        trace!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(from).to_path_buf();
                let reason = format!("Failed to walk: {e}");
                ForgeError::from(ApplicationError::Filesystem { path: at, reason })
            })?;

            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| ForgeError::Internal {
                    message: format!("walked outside {}: {e}", from.display()),
                })?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else {
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(entry.path(), e, "copy"))?;
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }

    fn absolute(&self, path: &Path) -> ForgeResult<PathBuf> {
        let path = if path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            path
        };

        // No `\\?\` verbatim prefix on Windows; CMake rejects it.
        match dunce::canonicalize(path) {
            Ok(canonical) => Ok(canonical),
            Err(_) => std::path::absolute(path).map_err(|e| map_io_error(path, e, "resolve")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::Other
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
