use super::ShellProxy;
use anyhow::{Context as _, Result};
use ash_types::{Context, ExitStatus};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

pub const USAGE: &str = "usage: http get <url>";

pub fn description() -> &'static str {
    "Fetch a URL with HTTP GET and print the body"
}

pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let url = match argv.as_slice() {
        [_, method, url] if method == "get" => url.clone(),
        _ => {
            ctx.write_stderr(USAGE).ok();
            return ExitStatus::ExitedWith(1);
        }
    };

    let timeout = proxy.http_timeout();
    // The blocking client cannot run on the runtime thread
    let handle = std::thread::spawn(move || fetch(&url, timeout));

    match handle.join() {
        Ok(Ok(body)) => {
            ctx.write_stdout(&console::style(body).green().to_string())
                .ok();
            ExitStatus::ExitedWith(0)
        }
        Ok(Err(e)) => {
            let msg = format!("http error: {e:#}");
            ctx.write_stderr(&console::style(msg).red().for_stderr().to_string())
                .ok();
            ExitStatus::ExitedWith(1)
        }
        Err(e) => {
            ctx.write_stderr(&format!("http: thread panic: {:?}", e))
                .ok();
            ExitStatus::ExitedWith(1)
        }
    }
}

fn fetch(url: &str, timeout: Duration) -> Result<String> {
    debug!("http get {} (timeout {:?})", url, timeout);
    let client = Client::builder()
        .user_agent("ash")
        .timeout(timeout)
        .build()
        .context("failed to build http client")?;
    let body = client
        .get(url)
        .send()
        .and_then(|res| res.error_for_status())
        .with_context(|| format!("request to {url} failed"))?
        .text()
        .context("failed to read response body")?;
    Ok(body)
}
