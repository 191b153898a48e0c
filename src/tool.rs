//! External tool invocation.
//!
//! Both programs delegate the real work to out-of-process tools: ImageMagick
//! `convert` assembles the PDFs and SANE `scanimage` talks to the scanner.
//! An [`Invocation`] describes *what* to run; a [`ToolRunner`] decides *how*.
//!
//! The production implementation is [`SystemRunner`], which spawns the
//! process and blocks until it exits. There is no timeout: a hung tool hangs
//! the caller. Unit tests use the recording `MockRunner` from the test module
//! instead, so no test depends on ImageMagick or a scanner being installed.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} {}", describe_exit(.code))]
    Failed { program: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with status {c}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// A fully-built external command: program plus argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Program name as shown in messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Program followed by its arguments, lossily converted for display.
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program_name())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect()
    }
}

/// Runs external tools on behalf of the converter and the scanner driver.
pub trait ToolRunner {
    /// Run with inherited stdio; the tool's own output passes through.
    fn run(&self, invocation: &Invocation) -> Result<(), ToolError>;

    /// Run with the tool's standard output redirected into `stdout`.
    fn run_to_file(&self, invocation: &Invocation, stdout: File) -> Result<(), ToolError>;
}

/// Spawns real processes via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn execute(&self, invocation: &Invocation, stdout: Stdio) -> Result<(), ToolError> {
        debug!(command = ?invocation.command_line(), "running external tool");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdout(stdout)
            .status()
            .map_err(|source| ToolError::Spawn {
                program: invocation.program_name(),
                source,
            })?;
        check_status(invocation, status)
    }
}

fn check_status(invocation: &Invocation, status: ExitStatus) -> Result<(), ToolError> {
    if status.success() {
        Ok(())
    } else {
        Err(ToolError::Failed {
            program: invocation.program_name(),
            code: status.code(),
        })
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ToolError> {
        self.execute(invocation, Stdio::inherit())
    }

    fn run_to_file(&self, invocation: &Invocation, stdout: File) -> Result<(), ToolError> {
        self.execute(invocation, Stdio::from(stdout))
    }
}
