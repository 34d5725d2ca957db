//! Builtin command registry.
//!
//! Maps the names passed to `ShellProxy::dispatch` to their handlers.

use crate::shell::Shell;
use anyhow::Result;
use ash_types::Context;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::jobs;

/// Type alias for builtin command handler functions.
pub type CommandHandler = fn(&mut Shell, &Context, Vec<String>) -> Result<()>;

/// Global builtin command registry.
pub static BUILTIN_REGISTRY: Lazy<BuiltinRegistry> = Lazy::new(BuiltinRegistry::new);

/// Registry of builtin shell commands.
pub struct BuiltinRegistry {
    commands: HashMap<&'static str, CommandHandler>,
}

impl BuiltinRegistry {
    /// Create a new registry with all builtin commands registered.
    pub fn new() -> Self {
        let mut commands: HashMap<&'static str, CommandHandler> = HashMap::new();

        // Job control
        commands.insert("jobs", jobs::execute_jobs);
        commands.insert("kill", jobs::execute_kill);

        Self { commands }
    }

    /// Get a command handler by name.
    pub fn get(&self, name: &str) -> Option<&CommandHandler> {
        self.commands.get(name)
    }

    /// Check if a command is handled here.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
