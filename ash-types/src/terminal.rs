use nix::unistd::isatty;
use std::os::unix::io::RawFd;
use tracing::debug;

/// How the shell is attached to its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    /// stdin is a terminal; prompt and interrupt notice are shown
    Interactive,
    /// stdin is a pipe or file; lines are consumed silently
    Piped,
}

impl ShellMode {
    /// Detect mode from the standard input descriptor
    pub fn detect() -> Self {
        Self::detect_fd(libc::STDIN_FILENO)
    }

    pub fn detect_fd(fd: RawFd) -> Self {
        let is_tty = isatty(fd).unwrap_or(false);
        debug!("Terminal detection for fd {}: {}", fd, is_tty);
        if is_tty {
            ShellMode::Interactive
        } else {
            ShellMode::Piped
        }
    }

    /// Whether a prompt should be printed before reading a line
    pub fn shows_prompt(&self) -> bool {
        matches!(self, ShellMode::Interactive)
    }
}
