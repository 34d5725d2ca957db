//! Line-oriented read-eval loop.

use crate::errors::display_user_error;
use crate::shell::Shell;
use anyhow::Result;
use ash_types::{AshError, Context};
use std::io::{BufRead, Cursor, Stdin, Write};
use tracing::debug;

/// Where the loop reads its lines from.
/// Stdin is locked per line so builtins like `wordle` can read from it too.
pub trait LineSource {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize>;
}

impl LineSource for Stdin {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineSource for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

pub struct Repl<'a> {
    pub shell: &'a mut Shell,
}

impl<'a> Repl<'a> {
    pub fn new(shell: &'a mut Shell) -> Self {
        Repl { shell }
    }

    /// Read and evaluate lines until `exit` or end of input.
    /// Returns the exit code of the shell.
    pub async fn run<R: LineSource>(&mut self, ctx: &mut Context, input: &mut R) -> Result<i32> {
        loop {
            if ctx.is_interactive() {
                print_prompt();
            }

            let mut line = String::new();
            let read = input.read_line(&mut line).map_err(AshError::from)?;
            if read == 0 {
                debug!("end of input");
                break;
            }

            if let Err(err) = self.shell.eval_str(ctx, line).await {
                display_user_error(ctx, &err);
            }
            if self.shell.exited.is_some() {
                break;
            }
        }
        Ok(self.shell.exited.map(|status| status.code()).unwrap_or(0))
    }
}

fn print_prompt() {
    let cwd = std::env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "?".to_string());
    print!("{} ", console::style(format!("[{cwd}] >")).cyan());
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Captured, quiet_shell};

    #[tokio::test]
    async fn test_job_session() {
        let mut cap = Captured::new();
        let mut shell = quiet_shell();
        let mut input = Cursor::new(
            "\n\
             sleep 30 &\n\
             jobs\n\
             kill 1\n\
             jobs\n\
             kill 99\n\
             exit\n\
             jobs\n",
        );

        let code = Repl::new(&mut shell)
            .run(&mut cap.ctx, &mut input)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            cap.stdout(),
            "background job started [id: 1]\n\
             [1] sleep (running)\n\
             job 1 killed\n\
             [1] sleep (exited)\n\
             Bye!\n"
        );
        assert!(cap.stderr().contains("invalid job id"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits_cleanly() {
        let mut cap = Captured::new();
        let mut shell = quiet_shell();
        let mut input = Cursor::new("pwd\n");

        let code = Repl::new(&mut shell)
            .run(&mut cap.ctx, &mut input)
            .await
            .unwrap();
        assert_eq!(code, 0);
        assert!(shell.exited.is_none());
    }

    #[tokio::test]
    async fn test_errors_do_not_stop_the_loop() {
        let mut cap = Captured::new();
        let mut shell = quiet_shell();
        let mut input = Cursor::new(
            "ash-test-no-such-command\n\
             ash-test-no-such-command &\n\
             &\n\
             calc 1 +\n\
             calc 6 * 7\n",
        );

        Repl::new(&mut shell)
            .run(&mut cap.ctx, &mut input)
            .await
            .unwrap();
        assert!(cap.stdout().contains("Result: 42"));
        assert!(cap.stderr().contains("syntax error near '&'"));
        assert!(shell.jobs().is_empty());
    }
}
