use crate::errors::display_user_error;
use crate::process::run_foreground;
use crate::shell::Shell;
use crate::shell::parse::{CommandLine, parse_line, split_arguments};
use anyhow::Result;
use ash_types::{Context, ExitStatus};
use tracing::debug;

/// Evaluate one input line.
///
/// Failures of the command itself are reported on the context's stderr and
/// turned into a non-zero status; they never end the read loop.
pub async fn eval_str(shell: &mut Shell, ctx: &mut Context, input: String) -> Result<ExitStatus> {
    let line = match parse_line(&input) {
        Ok(Some(line)) => line,
        Ok(None) => return Ok(ExitStatus::ExitedWith(0)),
        Err(err) => {
            shell.history.push(input.trim().to_string());
            display_user_error(ctx, &err.into());
            return Ok(ExitStatus::ExitedWith(2));
        }
    };
    shell.history.push(input.trim().to_string());
    debug!("EVAL: {:?}", line);

    let status = match run_line(shell, ctx, &line).await {
        Ok(status) => status,
        Err(err) => {
            display_user_error(ctx, &err);
            ExitStatus::ExitedWith(1)
        }
    };

    if shell.exited.is_none() {
        shell.show_tip_if_due(ctx);
    }
    Ok(status)
}

async fn run_line(shell: &mut Shell, ctx: &Context, line: &CommandLine) -> Result<ExitStatus> {
    let args = split_arguments(&line.arguments)?;

    if line.background {
        let id = shell.jobs.spawn_background(&line.command, &args)?;
        ctx.write_stdout(&format!("background job started [id: {id}]"))?;
        return Ok(ExitStatus::Background(id));
    }

    if let Some(builtin) = ash_builtin::get_command(&line.command) {
        debug!("EVAL: builtin '{}'", line.command);
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(line.command.clone());
        argv.extend(args);
        return Ok(builtin(ctx, argv, shell));
    }

    run_foreground(ctx, &line.command, &args).await
}
