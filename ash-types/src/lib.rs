use anyhow::Result;
use libc::{STDERR_FILENO, STDOUT_FILENO};
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::mem;
use std::os::unix::io::FromRawFd;
use std::os::unix::io::RawFd;
use thiserror::Error;

pub mod terminal;
pub use terminal::ShellMode;

/// ash specific error types
#[derive(Error, Debug)]
pub enum AshError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AshResult<T> = std::result::Result<T, AshError>;

/// Per-command execution context: which descriptors a command writes to.
#[derive(Clone)]
pub struct Context {
    pub shell_mode: ShellMode,
    pub outfile: RawFd,
    pub errfile: RawFd,
}

impl Context {
    pub fn new() -> Self {
        Context {
            shell_mode: ShellMode::detect(),
            outfile: STDOUT_FILENO,
            errfile: STDERR_FILENO,
        }
    }

    /// Context writing to the given descriptors instead of the standard streams.
    /// The descriptors stay owned by the caller.
    pub fn with_output(outfile: RawFd, errfile: RawFd) -> Self {
        Context {
            shell_mode: ShellMode::Piped,
            outfile,
            errfile,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.shell_mode.shows_prompt()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Context")
            .field("shell_mode", &self.shell_mode)
            .field("outfile", &self.outfile)
            .field("errfile", &self.errfile)
            .finish()
    }
}

impl Context {
    pub fn write_stdout(&self, msg: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.outfile) };
        let res = writeln!(&mut file, "{msg}");
        mem::forget(file);
        res?;
        Ok(())
    }

    pub fn write_stderr(&self, msg: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.errfile) };
        let res = writeln!(&mut file, "{msg}");
        mem::forget(file);
        res?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    ExitedWith(i32),
    /// Command was handed to the job registry under this id
    Background(usize),
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::ExitedWith(code) => *code,
            ExitStatus::Background(_) => 0,
        }
    }
}
