pub mod eval;
pub mod parse;

use crate::config::Config;
use crate::process::JobRegistry;
use anyhow::Result;
use ash_types::{Context, ExitStatus};
use tracing::debug;

pub const APP_NAME: &str = "ash";

pub struct Shell {
    pub config: Config,
    pub exited: Option<ExitStatus>,
    pub(crate) jobs: JobRegistry,
    pub(crate) history: Vec<String>,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("jobs", &self.jobs)
            .finish()
    }
}

// No Drop impl: background jobs outlive the shell and are left to init.

impl Shell {
    pub fn new(config: Config) -> Self {
        Shell {
            config,
            exited: None,
            jobs: JobRegistry::new(),
            history: Vec::new(),
        }
    }

    pub async fn eval_str(&mut self, ctx: &mut Context, input: String) -> Result<ExitStatus> {
        eval::eval_str(self, ctx, input).await
    }

    pub fn exit(&mut self) {
        self.exited = Some(ExitStatus::ExitedWith(0));
    }

    pub fn jobs(&self) -> &JobRegistry {
        &self.jobs
    }

    /// Print a random tip every `tip_interval` accepted lines
    pub(crate) fn show_tip_if_due(&self, ctx: &Context) {
        let interval = self.config.tip_interval;
        if interval == 0 || self.history.is_empty() || self.history.len() % interval != 0 {
            return;
        }
        if let Some(tip) = ash_builtin::tips::random_tip(&self.config.tips) {
            debug!("showing tip after {} commands", self.history.len());
            ctx.write_stdout(&console::style(tip).yellow().dim().to_string())
                .ok();
        }
    }
}
