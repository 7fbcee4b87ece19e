//! Runs external tools with `std::process::Command`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use forge_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{ProcessInvocation, ProcessOutput},
    error::ForgeResult,
};

/// Production process runner. Blocks until the child exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(step = %invocation.step()))]
    fn run(&self, invocation: &ProcessInvocation) -> ForgeResult<ProcessOutput> {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.arguments())
            .stdin(Stdio::null());

        debug!(command = %invocation, "Spawning");
        let output = command.output().map_err(|e| ApplicationError::ProcessSpawn {
            step: invocation.step(),
            program: invocation.program().to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(code = ?output.status.code(), "Exited");
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
