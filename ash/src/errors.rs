use ash_types::Context;
use tracing::debug;

/// Report an error inline on the context's stderr without a backtrace.
pub fn display_user_error(ctx: &Context, err: &anyhow::Error) {
    debug!("reporting error: {:?}", err);
    let msg = format!("ash: {err:#}");
    if ctx
        .write_stderr(&console::style(&msg).red().for_stderr().to_string())
        .is_err()
    {
        eprintln!("{msg}");
    }
}
