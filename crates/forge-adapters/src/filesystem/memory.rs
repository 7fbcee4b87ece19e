//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use forge_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::ForgeResult,
};

/// In-memory filesystem for testing.
///
/// Relative paths are resolved against `/`. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = normalize(path.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dirs(parent);
            }
            inner.files.insert(path, content.into());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(&normalize(path)).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> ForgeResult<Option<EntryKind>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let path = normalize(path);

        if inner.files.contains_key(&path) {
            Ok(Some(EntryKind::File))
        } else if inner.directories.contains(&path) {
            Ok(Some(EntryKind::Directory))
        } else {
            Ok(None)
        }
    }

    fn read_dir(&self, path: &Path) -> ForgeResult<Vec<DirEntry>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let dir = normalize(path);

        if !inner.directories.contains(&dir) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "Not a directory".into(),
            }
            .into());
        }

        let is_child = |p: &Path| p.parent() == Some(dir.as_path());
        let files = inner
            .files
            .keys()
            .filter(|p| is_child(p))
            .map(|p| DirEntry::new(p.clone(), EntryKind::File));
        let dirs = inner
            .directories
            .iter()
            .filter(|p| is_child(p))
            .map(|p| DirEntry::new(p.clone(), EntryKind::Directory));

        Ok(files.chain(dirs).collect())
    }

    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.files.get(&normalize(path)).cloned().ok_or_else(|| {
            ApplicationError::FileRead {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let path = normalize(path);

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !inner.directories.contains(parent) {
                return Err(ApplicationError::FileWrite {
                    path,
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path, content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.add_dirs(&normalize(path));
        Ok(())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let (from, to) = (normalize(from), normalize(to));

        if !inner.directories.contains(&from) {
            return Err(ApplicationError::Filesystem {
                path: from,
                reason: "Source directory does not exist".into(),
            }
            .into());
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(&from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| {
                p.strip_prefix(&from)
                    .ok()
                    .map(|rel| (to.join(rel), c.clone()))
            })
            .collect();

        for dir in dirs {
            inner.add_dirs(&dir);
        }
        inner.files.extend(files);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        let content = self.read_to_string(from).map_err(|_| ApplicationError::Filesystem {
            path: from.to_path_buf(),
            reason: "No such file".into(),
        })?;
        self.write_file(to, &content)
    }

    fn absolute(&self, path: &Path) -> ForgeResult<PathBuf> {
        Ok(normalize(path))
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(&path) || inner.directories.contains(&path))
            .unwrap_or(false)
    }
}

/// Lexically resolve `path` against `/`, dropping `.` and folding `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
