//! Resource bundle discovery.
//!
//! The bundle holds the `TungstenReflect/` and `TungstenRuntime/` skeletons
//! and the `Templates/` directory the build renders from.
//!
//! # Resolution order
//!
//! 1. An explicit directory (configuration or `--resources`). If given, it
//!    must be complete; no fallback is tried.
//! 2. **`$FORGE_RESOURCES_DIR`**.
//! 3. **`<executable-dir>/res`**, for installed binaries.
//! 4. **`./res`** relative to the current working directory.
//! 5. The `res/` directory of the source checkout this binary was built from.
//!
//! When nothing is found the embedded copy can be written out with
//! [`extract_builtin`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, instrument};

use forge_core::{
    application::ports::Filesystem,
    domain::entities::layout::{REFLECT_PROJECT, RUNTIME_PROJECT},
    error::ForgeResult,
};

/// Templates a complete bundle provides.
pub const TEMPLATE_FILES: [&str; 5] = [
    "TungstenProjectCMakeListsTemplate.txt",
    "TungstenReflectCMakeListsTemplate.txt",
    "TungstenReflectProjectDefines.in.hpp",
    "TungstenRuntimeCMakeListsTemplate.txt",
    "TungstenRuntimeProjectDefines.in.hpp",
];

/// The bundle compiled into the binary, as (relative path, content).
const BUILTIN: [(&str, &str); 7] = [
    (
        "Templates/TungstenProjectCMakeListsTemplate.txt",
        include_str!("../../../res/Templates/TungstenProjectCMakeListsTemplate.txt"),
    ),
    (
        "Templates/TungstenReflectCMakeListsTemplate.txt",
        include_str!("../../../res/Templates/TungstenReflectCMakeListsTemplate.txt"),
    ),
    (
        "Templates/TungstenReflectProjectDefines.in.hpp",
        include_str!("../../../res/Templates/TungstenReflectProjectDefines.in.hpp"),
    ),
    (
        "Templates/TungstenRuntimeCMakeListsTemplate.txt",
        include_str!("../../../res/Templates/TungstenRuntimeCMakeListsTemplate.txt"),
    ),
    (
        "Templates/TungstenRuntimeProjectDefines.in.hpp",
        include_str!("../../../res/Templates/TungstenRuntimeProjectDefines.in.hpp"),
    ),
    (
        "TungstenReflect/src/main.cpp",
        include_str!("../../../res/TungstenReflect/src/main.cpp"),
    ),
    (
        "TungstenRuntime/src/main.cpp",
        include_str!("../../../res/TungstenRuntime/src/main.cpp"),
    ),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("no resource bundle found (searched: {})", display_list(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("resource bundle at {} is incomplete: missing {}", .root.display(), .missing.display())]
    Incomplete { root: PathBuf, missing: PathBuf },
}

fn display_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Find a complete bundle, honoring `explicit` if given.
#[instrument(skip_all)]
pub fn discover(
    filesystem: &dyn Filesystem,
    explicit: Option<&Path>,
) -> Result<PathBuf, ResourceError> {
    if let Some(dir) = explicit {
        validate(filesystem, dir)?;
        info!(path = %dir.display(), "Using configured resource bundle");
        return Ok(dir.to_path_buf());
    }

    let candidates = candidate_paths();
    for candidate in &candidates {
        debug!(path = %candidate.display(), "checking candidate resource path");
        match validate(filesystem, candidate) {
            Ok(()) => {
                info!(path = %candidate.display(), "Resource bundle found");
                return Ok(candidate.clone());
            }
            Err(e) => debug!(error = %e, "skipping"),
        }
    }

    Err(ResourceError::NotFound {
        searched: candidates,
    })
}

/// Check that `root` holds both skeletons and every template.
pub fn validate(filesystem: &dyn Filesystem, root: &Path) -> Result<(), ResourceError> {
    let required = [PathBuf::from(REFLECT_PROJECT), PathBuf::from(RUNTIME_PROJECT)]
        .into_iter()
        .chain(
            TEMPLATE_FILES
                .iter()
                .map(|name| Path::new("Templates").join(name)),
        );

    for relative in required {
        if !filesystem.exists(&root.join(&relative)) {
            return Err(ResourceError::Incomplete {
                root: root.to_path_buf(),
                missing: relative,
            });
        }
    }
    Ok(())
}

/// Write the embedded bundle under `dest` and return `dest`.
#[instrument(skip_all, fields(dest = %dest.display()))]
pub fn extract_builtin(filesystem: &dyn Filesystem, dest: &Path) -> ForgeResult<PathBuf> {
    for (relative, content) in BUILTIN {
        let path = dest.join(relative);
        if let Some(parent) = path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write_file(&path, content)?;
    }
    info!(files = BUILTIN.len(), "Extracted built-in resource bundle");
    Ok(dest.to_path_buf())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);

    if let Ok(env_dir) = std::env::var("FORGE_RESOURCES_DIR") {
        paths.push(PathBuf::from(env_dir));
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join("res"));
    }

    paths.push(PathBuf::from("res"));
    paths.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../res"));

    paths
}
