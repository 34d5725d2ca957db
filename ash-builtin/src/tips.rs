use super::ShellProxy;
use ash_types::{Context, ExitStatus};
use rand::seq::SliceRandom;

pub fn description() -> &'static str {
    "Show a random tip"
}

pub fn default_tips() -> Vec<String> {
    [
        "help is your friend!",
        "You are stronger than you think.",
        "Why do programmers prefer dark mode? Because light attracts bugs.",
        "Use 'cd ..' to go one directory up",
        "Mistakes are how you learn.",
        "Append '&' to run a command in the background, then check it with 'jobs'",
        "Try 'http get https://catfact.ninja/fact'",
        "Don't give up!",
    ]
    .iter()
    .map(|tip| tip.to_string())
    .collect()
}

/// Picks one tip at random, None when the list is empty
pub fn random_tip(tips: &[String]) -> Option<&String> {
    tips.choose(&mut rand::thread_rng())
}

pub fn command(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let tips = proxy.tips();
    if let Some(tip) = random_tip(&tips) {
        ctx.write_stdout(&console::style(tip).yellow().dim().to_string())
            .ok();
    }
    ExitStatus::ExitedWith(0)
}
