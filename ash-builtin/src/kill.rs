use super::ShellProxy;
use ash_types::{Context, ExitStatus};

pub const COMMAND_NAME: &str = "kill";

pub fn description() -> &'static str {
    "Terminate a background job by id"
}

pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    match proxy.dispatch(ctx, COMMAND_NAME, argv) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(e) => {
            ctx.write_stderr(&format!("{COMMAND_NAME}: {e}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
