use super::ShellProxy;
use ash_types::{Context, ExitStatus};

/// Built-in help command implementation
/// Displays a list of all available built-in commands with their descriptions
pub fn command(ctx: &Context, _argv: Vec<String>, _proxy: &mut dyn ShellProxy) -> ExitStatus {
    let commands = vec![
        ("help", "Show this list"),
        ("calc <expr>", super::calc::description()),
        ("cd <path>", super::cd::description()),
        ("pwd", super::pwd::description()),
        ("http get <url>", super::http::description()),
        ("jobs", super::jobs::description()),
        ("kill <id>", super::kill::description()),
        ("tips", super::tips::description()),
        ("wordle", super::wordle::description()),
        ("<command> &", "Run any command in the background"),
        ("exit", "Exit the shell"),
    ];

    let mut help_text = String::from("Built-in commands:\n");
    for (cmd, description) in commands {
        help_text.push_str(&format!("  {:<16} {}\n", cmd, description));
    }

    match ctx.write_stdout(&console::style(help_text.trim_end()).yellow().to_string()) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            ctx.write_stderr(&format!("help: failed to display help: {err}"))
                .ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
