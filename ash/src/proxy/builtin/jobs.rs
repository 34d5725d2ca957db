//! Job control command handlers (jobs, kill).

use crate::shell::Shell;
use anyhow::{Result, anyhow};
use ash_types::Context;
use getopts::Options;
use tracing::debug;

const KILL_USAGE: &str = "usage: kill <id>";

/// Execute the `jobs` builtin command.
///
/// Lists every registered job as `[id] command (running|exited)`.
/// `-p` removes exited jobs instead.
pub fn execute_jobs(shell: &mut Shell, ctx: &Context, argv: Vec<String>) -> Result<()> {
    let mut opts = Options::new();
    opts.optflag("p", "prune", "remove jobs that have exited");
    opts.optflag("h", "help", "print this help menu");

    let matches = opts.parse(argv.iter().skip(1))?;
    if matches.opt_present("h") {
        ctx.write_stdout(&opts.usage("Usage: jobs [options]"))?;
        return Ok(());
    }

    if matches.opt_present("p") {
        for id in shell.jobs.prune_exited() {
            ctx.write_stdout(&format!("[{id}] removed"))?;
        }
        return Ok(());
    }

    debug!("JOBS_CMD: listing {} jobs", shell.jobs.len());
    for status in shell.jobs.list_jobs() {
        ctx.write_stdout(&status.to_string())?;
    }
    Ok(())
}

/// Execute the `kill` builtin command.
///
/// Sends SIGKILL to the job with the given id. The job stays listed.
pub fn execute_kill(shell: &mut Shell, ctx: &Context, argv: Vec<String>) -> Result<()> {
    let id = match argv.as_slice() {
        [_, id] => id
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow!("invalid job id"))?,
        _ => return Err(anyhow!(KILL_USAGE)),
    };

    debug!("KILL_CMD: killing job {}", id);
    shell.jobs.kill_job(id)?;
    ctx.write_stdout(&format!("job {id} killed"))?;
    Ok(())
}
