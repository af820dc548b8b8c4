// src/exec.rs

//! Subprocess execution seam
//!
//! Every external tool the pipeline touches (package managers, version
//! probes, the terminfo compiler and decompiler) goes through the
//! [`CommandRunner`] trait, so tests can substitute scripted outputs for
//! real processes.

use std::ffi::OsString;
use std::io;
use std::process::{Command, Stdio};

/// A fully described subprocess invocation
///
/// Children always get a closed stdin and a captured stdout. stderr is
/// inherited unless explicitly discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub program: OsString,
    pub args: Vec<OsString>,
    /// Variables removed from the child environment
    pub env_remove: Vec<OsString>,
    /// Variables overridden in the child environment
    pub env_set: Vec<(OsString, OsString)>,
    /// Discard the child's stderr instead of inheriting it
    pub discard_stderr: bool,
}

impl RunRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env_remove: Vec::new(),
            env_set: Vec::new(),
            discard_stderr: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env_remove(mut self, name: impl Into<OsString>) -> Self {
        self.env_remove.push(name.into());
        self
    }

    pub fn env(mut self, name: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env_set.push((name.into(), value.into()));
        self
    }

    pub fn discard_stderr(mut self) -> Self {
        self.discard_stderr = true;
        self
    }

    /// The invocation as a human-readable command line, for diagnostics
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Captured result of a finished subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Whether the child exited with status zero
    pub success: bool,
    /// Everything the child wrote to stdout
    pub stdout: Vec<u8>,
}

/// Launches subprocesses and captures their output
pub trait CommandRunner {
    /// Run a command to completion
    ///
    /// Returns `Err` only when the child could not be launched; a non-zero
    /// exit is reported through [`RunOutput::success`].
    fn run(&self, request: &RunRequest) -> io::Result<RunOutput>;
}

/// Runs commands on the real system via `std::process`
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, request: &RunRequest) -> io::Result<RunOutput> {
        let mut command = Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if request.discard_stderr {
                Stdio::null()
            } else {
                Stdio::inherit()
            });

        for name in &request.env_remove {
            command.env_remove(name);
        }
        for (name, value) in &request.env_set {
            command.env(name, value);
        }

        let output = command.output()?;
        Ok(RunOutput {
            success: output.status.success(),
            stdout: output.stdout,
        })
    }
}
