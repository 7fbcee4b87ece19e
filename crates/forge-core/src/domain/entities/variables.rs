//! Named path variables that parameterize a build.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::error::DomainError;

/// The closed set of build variables.
///
/// There is no "count" sentinel: every value of this enum names a real
/// variable, so the store can index its slots without a bounds check failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Var {
    WorkspacePath,
    ProjectPath,
    EngineDir,
    IntDir,
    BuildDir,
}

impl Var {
    /// Every variable, in declaration order.
    pub const ALL: [Var; 5] = [
        Var::WorkspacePath,
        Var::ProjectPath,
        Var::EngineDir,
        Var::IntDir,
        Var::BuildDir,
    ];

    pub const COUNT: usize = Self::ALL.len();

    const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Var::WorkspacePath => "workspace_path",
            Var::ProjectPath => "project_path",
            Var::EngineDir => "engine_dir",
            Var::IntDir => "int_dir",
            Var::BuildDir => "build_dir",
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size store of optional path values, one slot per [`Var`].
///
/// A value is observable only after an explicit [`set`](Self::set); nothing is
/// derived from other variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    slots: [Option<PathBuf>; Var::COUNT],
}

impl VariableStore {
    /// Create a store with every variable unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: Var) -> Option<&Path> {
        self.slots[var.index()].as_deref()
    }

    pub fn set(&mut self, var: Var, path: impl Into<PathBuf>) {
        self.slots[var.index()] = Some(path.into());
    }

    pub fn is_set(&self, var: Var) -> bool {
        self.slots[var.index()].is_some()
    }

    pub fn clear(&mut self, var: Var) {
        self.slots[var.index()] = None;
    }

    /// Like [`get`](Self::get), but an unset variable is an error.
    pub fn require(&self, var: Var) -> Result<&Path, DomainError> {
        self.get(var).ok_or(DomainError::VariableNotSet { var })
    }
}
