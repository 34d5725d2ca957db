//! Shell proxy implementation for builtin command dispatch.
//!
//! This module provides the `ShellProxy` trait implementation for `Shell`,
//! routing builtin commands to their respective handlers.

mod builtin;

use crate::shell::Shell;
use anyhow::{Result, anyhow};
use ash_builtin::ShellProxy;
use ash_types::Context;
use std::time::Duration;
use tracing::debug;

impl ShellProxy for Shell {
    fn exit_shell(&mut self) {
        self.exit();
    }

    fn dispatch(&mut self, ctx: &Context, cmd: &str, argv: Vec<String>) -> Result<()> {
        use builtin::registry::BUILTIN_REGISTRY;

        debug!("dispatch {} {:?}", cmd, argv);
        match BUILTIN_REGISTRY.get(cmd) {
            Some(handler) => handler(self, ctx, argv),
            None => Err(anyhow!("unknown command: {cmd}")),
        }
    }

    fn changepwd(&mut self, path: &str) -> Result<()> {
        std::env::set_current_dir(path)?;
        debug!("changed directory to {}", path);
        Ok(())
    }

    fn tips(&self) -> Vec<String> {
        self.config.tips.clone()
    }

    fn wordle_words(&self) -> Vec<String> {
        self.config.words.clone()
    }

    fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.config.http_timeout_secs)
    }
}
