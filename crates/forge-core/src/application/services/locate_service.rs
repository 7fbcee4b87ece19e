//! Project Locator - resolves a user path to exactly one descriptor file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{
    LocateError,
    ports::{EntryKind, Filesystem},
};
use crate::domain::DESCRIPTOR_EXTENSION;

pub struct ProjectLocator {
    filesystem: Arc<dyn Filesystem>,
}

impl ProjectLocator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Resolve `input` to a descriptor path.
    ///
    /// A regular file is returned as-is whatever its extension. A directory
    /// must hold exactly one `.wproj` file among its direct children.
    #[instrument(skip(self), fields(input = %input.display()))]
    pub fn locate(&self, input: &Path) -> Result<PathBuf, LocateError> {
        let kind = self
            .filesystem
            .entry_kind(input)
            .map_err(|e| fault(input, e))?;

        match kind {
            None => Err(LocateError::InvalidPath {
                path: input.to_path_buf(),
                reason: "project file or directory does not exist".into(),
            }),
            Some(EntryKind::File) => Ok(input.to_path_buf()),
            Some(EntryKind::Directory) => self.search_dir(input),
            Some(EntryKind::Other) => Err(LocateError::InvalidPath {
                path: input.to_path_buf(),
                reason: "not a regular file or directory".into(),
            }),
        }
    }

    fn search_dir(&self, dir: &Path) -> Result<PathBuf, LocateError> {
        let entries = self.filesystem.read_dir(dir).map_err(|e| fault(dir, e))?;

        let mut found: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| entry.is_file() && is_descriptor(&entry.path))
            .map(|entry| entry.path)
            .collect();
        found.sort();

        debug!(count = found.len(), "Descriptor candidates");

        match found.len() {
            0 => Err(LocateError::NotFound {
                dir: dir.to_path_buf(),
            }),
            1 => Ok(found.remove(0)),
            _ => Err(LocateError::Ambiguous {
                dir: dir.to_path_buf(),
                candidates: found
                    .iter()
                    .map(|p| file_name_of(p))
                    .collect(),
            }),
        }
    }
}

fn is_descriptor(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn fault(path: &Path, err: impl std::fmt::Display) -> LocateError {
    LocateError::FilesystemFault {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
