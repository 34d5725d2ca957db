use super::ShellProxy;
use ash_types::{Context, ExitStatus};
use std::path::Path;

pub fn description() -> &'static str {
    "Change the current working directory"
}

pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let target = argv.get(1..).map(|args| args.join(" ")).unwrap_or_default();

    let dir = match target.as_str() {
        "" => match dirs::home_dir() {
            Some(home_dir) => home_dir.to_string_lossy().into_owned(),
            None => String::from("/"),
        },
        dir if dir.starts_with('/') => dir.to_string(),
        dir if dir.starts_with('~') => shellexpand::tilde(dir).to_string(),
        dir => {
            let current_dir = match std::env::current_dir() {
                Ok(current_dir) => current_dir,
                Err(err) => {
                    ctx.write_stderr(&format!("cd: {err}")).ok();
                    return ExitStatus::ExitedWith(1);
                }
            };
            match Path::new(&current_dir).join(dir).canonicalize() {
                Ok(res) => res.to_string_lossy().into_owned(),
                Err(err) => {
                    ctx.write_stderr(&format!("cd: {}: {}", err, dir)).ok();
                    return ExitStatus::ExitedWith(1);
                }
            }
        }
    };

    match proxy.changepwd(&dir) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            ctx.write_stderr(&format!("cd: {}: {}", err, dir)).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
