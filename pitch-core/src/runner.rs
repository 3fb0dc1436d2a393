//! Command runner for external process execution.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to launch {}: {source}", .program.display())]
    ProcessSpawnFailed { program: PathBuf, source: io::Error },

    #[error("{} exited with code {:?}", .program.display(), .code)]
    ProcessNonZeroExit {
        program: PathBuf,
        code: Option<i32>,
        output: String,
    },
}

impl RunError {
    /// Raw tool output carried by the error, if any.
    pub fn output(&self) -> &str {
        match self {
            RunError::ProcessSpawnFailed { .. } => "",
            RunError::ProcessNonZeroExit { output, .. } => output,
        }
    }
}

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RunOutput {
    /// Stdout followed by stderr, as lossy UTF-8.
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).to_string();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }
}

/// Runs an executable to completion.
///
/// Arguments are OS strings so file paths reach the tool byte for byte.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<RunOutput, RunError>;
}

/// Runs real child processes, blocking the caller until exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<RunOutput, RunError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut cmd);

        tracing::debug!("Running: {} {:?}", program.display(), args);

        let output = cmd.output().map_err(|source| RunError::ProcessSpawnFailed {
            program: program.to_path_buf(),
            source,
        })?;

        let captured = RunOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        };

        if !output.status.success() {
            tracing::warn!(
                "{} exited with code {:?}",
                program.display(),
                output.status.code()
            );
            return Err(RunError::ProcessNonZeroExit {
                program: program.to_path_buf(),
                code: output.status.code(),
                output: captured.combined(),
            });
        }

        Ok(captured)
    }
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}
