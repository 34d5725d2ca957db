use anyhow::Result;
use ash_types::{Context, ExitStatus};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

// Builtin command modules
pub mod calc;
pub mod cd;
mod help;
mod http;
mod jobs;
mod kill;
mod pwd;
pub mod tips;
pub mod wordle;

/// Trait that provides an interface for builtin commands to interact with the shell
/// This allows builtin commands to perform shell operations without direct coupling
pub trait ShellProxy {
    /// Initiates shell exit process
    fn exit_shell(&mut self);

    /// Dispatches a command to the shell's command execution system
    /// Used for commands that need shell-owned state such as the job registry
    fn dispatch(&mut self, ctx: &Context, cmd: &str, argv: Vec<String>) -> Result<()>;

    /// Changes the current working directory
    fn changepwd(&mut self, path: &str) -> Result<()>;

    /// Configured tip lines
    fn tips(&self) -> Vec<String>;

    /// Configured word list for the guessing game
    fn wordle_words(&self) -> Vec<String>;

    /// Timeout applied to `http get`
    fn http_timeout(&self) -> Duration;
}

/// Type alias for builtin command function signature
/// All builtin commands must conform to this signature
pub type BuiltinCommand =
    fn(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus;

/// Global registry of all builtin commands
/// Uses lazy initialization and mutex for thread-safe access
pub static BUILTIN_COMMAND: Lazy<Mutex<HashMap<&str, BuiltinCommand>>> = Lazy::new(|| {
    let mut builtin = HashMap::new();

    // Core shell commands
    builtin.insert("exit", exit as BuiltinCommand);
    builtin.insert("help", help::command as BuiltinCommand);
    builtin.insert("cd", cd::command as BuiltinCommand);
    builtin.insert("pwd", pwd::command as BuiltinCommand);

    // Job control commands
    builtin.insert("jobs", jobs::command as BuiltinCommand);
    builtin.insert("kill", kill::command as BuiltinCommand);

    // Utility commands
    builtin.insert("calc", calc::command as BuiltinCommand);
    builtin.insert("http", http::command as BuiltinCommand);
    builtin.insert("tips", tips::command as BuiltinCommand);
    builtin.insert("wordle", wordle::command as BuiltinCommand);

    Mutex::new(builtin)
});

/// Retrieves a builtin command function by name
/// Returns None if the command is not found
pub fn get_command(name: &str) -> Option<BuiltinCommand> {
    if let Ok(builtin) = BUILTIN_COMMAND.lock() {
        builtin.get(name).copied()
    } else {
        None
    }
}

/// Built-in exit command implementation
pub fn exit(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    debug!("Exit command called - initiating normal shell exit");
    ctx.write_stdout("Bye!").ok();
    proxy.exit_shell();
    ExitStatus::ExitedWith(0)
}
