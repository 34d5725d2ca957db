use crate::config::{CONFIG_FILE, Config};
use crate::errors::display_user_error;
use crate::repl::Repl;
use crate::shell::{APP_NAME, Shell};
use anyhow::{Context as _, Result};
use ash_types::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod errors;
pub mod process;
pub mod proxy;
pub mod repl;
pub mod shell;

#[cfg(test)]
mod test_utils;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "ASH_LOG";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single command line and exit
    #[arg(short, long)]
    pub command: Option<String>,
}

pub fn lib_main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("ash: logging disabled: {err:#}");
    }

    setup_panic_handler();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("ash: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    rt.block_on(run_shell())
}

pub async fn run_shell() -> ExitCode {
    let cli = Cli::parse();
    let mut shell = Shell::new(Config::from_file(CONFIG_FILE));
    let mut ctx = Context::new();

    if let Some(command) = cli.command.as_deref() {
        execute_command(&mut shell, &mut ctx, command).await
    } else {
        run_interactive(&mut shell, &mut ctx).await
    }
}

fn init_tracing() -> Result<()> {
    let xdg_dir =
        xdg::BaseDirectories::with_prefix(APP_NAME).context("failed get xdg directory")?;
    let log_path = xdg_dir
        .place_cache_file("ash.log")
        .context("failed get log path")?;
    let log_file = std::sync::Arc::new(std::fs::File::create(log_path)?);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("unnamed");

        let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        let location = if let Some(location) = panic_info.location() {
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
        } else {
            "Unknown location".to_string()
        };

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC");
        let backtrace = std::backtrace::Backtrace::capture();

        tracing::error!(
            "PANIC OCCURRED: {} at {} (thread {}, {})\n{}",
            payload,
            location,
            thread_name,
            timestamp,
            backtrace
        );

        eprintln!("\n=== ash PANIC ===");
        eprintln!("Message: {}", payload);
        eprintln!("Location: {}", location);
        eprintln!("Thread: {}", thread_name);
        eprintln!("Timestamp: {}", timestamp);
        eprintln!("=================\n");
    }));
}

async fn execute_command(shell: &mut Shell, ctx: &mut Context, command: &str) -> ExitCode {
    debug!("start shell in command mode");

    match shell.eval_str(ctx, command.to_string()).await {
        Ok(status) => {
            debug!("run command mode {:?} : {:?}", command, &status);
            if status.code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            display_user_error(ctx, &err);
            ExitCode::FAILURE
        }
    }
}

async fn run_interactive(shell: &mut Shell, ctx: &mut Context) -> ExitCode {
    debug!("start shell, mode {:?}", ctx.shell_mode);

    if ctx.is_interactive() {
        println!("Welcome to ash! Type 'help' for the list of commands.");
    }

    // Ctrl-C only prints a notice; children in the foreground group get the signal from the tty
    tokio::spawn(async {
        while tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted. Type 'exit' to quit.");
        }
    });

    let mut stdin = std::io::stdin();
    let mut repl = Repl::new(shell);
    match repl.run(ctx, &mut stdin).await {
        Ok(code) => ExitCode::from(code.clamp(0, 255) as u8),
        Err(err) => {
            display_user_error(ctx, &err);
            ExitCode::FAILURE
        }
    }
}
