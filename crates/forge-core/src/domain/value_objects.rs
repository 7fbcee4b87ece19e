use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

// ============================================================================
// Stage
// ============================================================================

/// One step of the build pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Locate,
    Parse,
    PrepareWorkspace,
    Render,
    Configure,
    Compile,
    Reflect,
    Collect,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Locate,
        Stage::Parse,
        Stage::PrepareWorkspace,
        Stage::Render,
        Stage::Configure,
        Stage::Compile,
        Stage::Reflect,
        Stage::Collect,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Locate => "locate",
            Stage::Parse => "parse",
            Stage::PrepareWorkspace => "prepare-workspace",
            Stage::Render => "render",
            Stage::Configure => "configure",
            Stage::Compile => "compile",
            Stage::Reflect => "reflect",
            Stage::Collect => "collect",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// External processes
// ============================================================================

/// Which external tool invocation a process belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStep {
    Configure,
    Build,
    Reflect,
}

impl ProcessStep {
    /// The pipeline stage that runs this step.
    pub const fn stage(self) -> Stage {
        match self {
            ProcessStep::Configure => Stage::Configure,
            ProcessStep::Build => Stage::Compile,
            ProcessStep::Reflect => Stage::Reflect,
        }
    }

    /// The log line recorded when this step exits unsuccessfully.
    pub const fn failure_message(self) -> &'static str {
        match self {
            ProcessStep::Configure => "CMake configuration failed.",
            ProcessStep::Build => "Build failed.",
            ProcessStep::Reflect => "TungstenReflect failed.",
        }
    }
}

impl fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStep::Configure => f.write_str("configure"),
            ProcessStep::Build => f.write_str("build"),
            ProcessStep::Reflect => f.write_str("reflect"),
        }
    }
}

/// A program and its argument list. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    step: ProcessStep,
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessInvocation {
    pub fn new(step: ProcessStep, program: impl Into<PathBuf>) -> Self {
        Self {
            step,
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    pub fn step(&self) -> ProcessStep {
        self.step
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for ProcessInvocation {
    /// Shell-like rendering for logs only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// What an external process produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}
