//! Foreground execution of external commands.

use anyhow::{Context as _, Result};
use ash_types::{Context, ExitStatus};
use std::os::unix::process::ExitStatusExt;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Run `command` and wait for it, copying its stdout and stderr line by line
/// to the context's output descriptors.
///
/// The caller is suspended until the child exits; there is no timeout.
pub async fn run_foreground(ctx: &Context, command: &str, args: &[String]) -> Result<ExitStatus> {
    debug!("FOREGROUND: spawning '{}' args {:?}", command, args);
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("{command}: failed to start"))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (status, out, err) = tokio::join!(
        child.wait(),
        forward(ctx, stdout, Stream::Stdout),
        forward(ctx, stderr, Stream::Stderr),
    );
    out?;
    err?;
    let status = status.with_context(|| format!("{command}: failed to wait"))?;

    let code = match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    };
    debug!("FOREGROUND: '{}' finished with {}", command, code);
    Ok(ExitStatus::ExitedWith(code))
}

async fn forward<R>(ctx: &Context, reader: Option<R>, stream: Stream) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(());
    };
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.strip_suffix('\n').unwrap_or(&line);
        match stream {
            Stream::Stdout => ctx.write_stdout(line)?,
            Stream::Stderr => ctx.write_stderr(line)?,
        }
    }
}
