//! Ready-made commands an embedder can register with [`register`].
//!
//! Arguments after the command name are parsed with [`argh`], so every builtin
//! understands `--help`.

use crate::command::{Command, Flow};
use crate::context::Context;
use crate::shell::Shell;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use log::warn;
use std::io::{self, Write};

/// Commands implemented in this crate.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Name the command is registered under, e.g. "echo".
    fn name() -> &'static str;

    /// One-line description shown by `help`.
    fn help() -> &'static str;

    fn execute(self, ctx: &Context<'_>, stdout: &mut dyn Write) -> Result<Flow>;
}

/// Register `echo`, `help` and `exit`.
pub fn register(shell: &mut Shell) {
    shell.add_cmd(command::<Echo>());
    shell.add_cmd(command::<Help>());
    shell.add_cmd(command::<Exit>());
}

pub(crate) fn command<T: BuiltinCommand>() -> Command {
    Command::new(T::name(), T::help(), |ctx| run::<T>(ctx, &mut io::stdout()))
}

/// Parse the arguments of `ctx` as `T` and execute it.
///
/// Usage output and errors are written to `stdout`; they never stop the shell.
pub(crate) fn run<T: BuiltinCommand>(ctx: &Context<'_>, stdout: &mut dyn Write) -> Flow {
    let args: Vec<&str> = ctx.args()[1..].iter().map(String::as_str).collect();
    let result = match T::from_args(&[T::name()], &args) {
        Ok(cmd) => cmd.execute(ctx, stdout),
        Err(EarlyExit { output, status: _ }) => print_early_exit(&output, stdout),
    };
    match result {
        Ok(flow) => flow,
        Err(e) => {
            if writeln!(stdout, "{}: {:#}", T::name(), e).is_err() {
                warn!("{}: {:#}", T::name(), e);
            }
            Flow::Continue
        }
    }
}

fn print_early_exit(output: &str, stdout: &mut dyn Write) -> Result<Flow> {
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(Flow::Continue)
}

#[derive(FromArgs)]
/// write the arguments to standard output, separated by spaces.
/// by default, a trailing newline is printed.
pub struct Echo {
    #[argh(switch, short = 'n')]
    /// do not output the trailing newline.
    pub no_newline: bool,

    #[argh(positional, greedy)]
    /// values to print as-is, separated by spaces.
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn help() -> &'static str {
        "write the arguments to standard output"
    }

    fn execute(self, _ctx: &Context<'_>, stdout: &mut dyn Write) -> Result<Flow> {
        let s = self.args.join(" ");
        if self.no_newline {
            write!(stdout, "{}", s)?;
            stdout.flush()?;
        } else {
            writeln!(stdout, "{}", s)?;
        }
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// list the registered commands.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn help() -> &'static str {
        "list the registered commands"
    }

    fn execute(self, ctx: &Context<'_>, stdout: &mut dyn Write) -> Result<Flow> {
        let cmds = ctx.shell().commands();
        let width = cmds.iter().map(|c| c.name().len()).max().unwrap_or(0);
        for cmd in cmds {
            writeln!(stdout, "{:<width$}  {}", cmd.name(), cmd.help(), width = width)?;
        }
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// leave the shell.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn help() -> &'static str {
        "leave the shell"
    }

    fn execute(self, _ctx: &Context<'_>, _stdout: &mut dyn Write) -> Result<Flow> {
        Ok(Flow::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_line<T: BuiltinCommand>(sh: &Shell, line: &str) -> (Flow, String) {
        let ctx = Context::new(line, sh);
        let mut out = Vec::new();
        let flow = run::<T>(&ctx, &mut out);
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_echo_with_and_without_newline() {
        let sh = Shell::new();

        let (flow, out) = run_line::<Echo>(&sh, "echo hello world");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "hello world\n");

        let (_, out) = run_line::<Echo>(&sh, "echo -n hello");
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_echo_keeps_empty_words() {
        let sh = Shell::new();
        let (_, out) = run_line::<Echo>(&sh, "echo a  b");
        assert_eq!(out, "a  b\n");
    }

    #[test]
    fn test_echo_usage() {
        let sh = Shell::new();
        let (flow, out) = run_line::<Echo>(&sh, "echo --help");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("Usage: echo"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_unknown_flag_reports_and_continues() {
        let sh = Shell::new();
        let (flow, out) = run_line::<Echo>(&sh, "echo --bogus");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("--bogus"));
    }

    #[test]
    fn test_help_lists_commands_in_order() {
        let mut sh = Shell::new();
        register(&mut sh);
        sh.add_cmd(Command::new("status", "show status", |_ctx| {}));

        let (_, out) = run_line::<Help>(&sh, "help");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines,
            [
                "echo    write the arguments to standard output",
                "help    list the registered commands",
                "exit    leave the shell",
                "status  show status",
            ]
        );
    }

    #[test]
    fn test_exit_stops() {
        let sh = Shell::new();
        let (flow, out) = run_line::<Exit>(&sh, "exit");
        assert_eq!(flow, Flow::Stop);
        assert!(out.is_empty());

        let (flow, _) = run_line::<Exit>(&sh, "exit now");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_registered_exit_stops_dispatch() {
        let mut sh = Shell::new();
        register(&mut sh);
        assert_eq!(sh.dispatch("exit"), Flow::Stop);
        assert_eq!(sh.commands().len(), 3);
    }
}
