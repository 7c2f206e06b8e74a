use crate::command::{Command, Flow, Handler, InterruptHandler, boxed_handler, boxed_interrupt};
use crate::context::Context;
use crate::home;
use crate::line_source::{LineConfig, LineSource, ReadError};
use crate::readline::Readline;
use anyhow::Context as _;
use log::{LevelFilter, debug, error, warn};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Printed by the default handler until the embedder installs its own.
pub const DEFAULT_HANDLER_MESSAGE: &str = "Default handler must be replaced!";

/// Printed by the default interrupt handler before the process exits.
pub const FAREWELL_MESSAGE: &str = "\rBye!";

fn write_line(out: &mut dyn Write, msg: &str) {
    if let Err(e) = writeln!(out, "{}", msg) {
        warn!("can't write to stdout: {}", e);
    }
}

fn default_handler(_ctx: &Context<'_>) -> Flow {
    write_line(&mut io::stdout(), DEFAULT_HANDLER_MESSAGE);
    Flow::Continue
}

fn default_interrupt() -> Flow {
    write_line(&mut io::stdout(), FAREWELL_MESSAGE);
    process::exit(0)
}

/// Interactive command shell.
///
/// Commands are looked up in registration order and the first exact name match
/// wins. Input that matches nothing goes to the default handler. There is one
/// default handler and one interrupt handler at a time; setting a new one replaces
/// the old one.
///
/// Configure with the setters, then call [`Shell::run`]. The line source is opened
/// once, on the first run, from the configuration at that moment.
pub struct Shell {
    handler: Handler,
    interrupt: InterruptHandler,
    cmds: Vec<Command>,
    reader: Option<Box<dyn LineSource>>,
    config: LineConfig,
}

impl Shell {
    /// Create a shell with the placeholder default handler and an interrupt
    /// handler that says goodbye and exits the process.
    pub fn new() -> Self {
        Self {
            handler: Box::new(default_handler),
            interrupt: Box::new(default_interrupt),
            cmds: Vec::new(),
            reader: None,
            config: LineConfig::default(),
        }
    }

    /// Append a command. Names are not checked; duplicates never run because the
    /// earlier registration wins.
    pub fn add_cmd(&mut self, cmd: Command) {
        self.cmds.push(cmd);
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Replace the handler for input that matches no command.
    pub fn set_handler<F, R>(&mut self, f: F)
    where
        F: Fn(&Context<'_>) -> R + 'static,
        R: Into<Flow>,
    {
        self.handler = boxed_handler(f);
    }

    /// Replace the interrupt handler. Return [`Flow::Stop`] to leave the run loop
    /// instead of exiting the process.
    pub fn set_interrupt_handler<F, R>(&mut self, f: F)
    where
        F: Fn() -> R + 'static,
        R: Into<Flow>,
    {
        self.interrupt = boxed_interrupt(f);
    }

    /// Persist history to `p` under the user's home directory.
    pub fn set_home_history_file(&mut self, p: impl AsRef<str>) {
        self.set_history_file(format!("{}/{}", home::user_home_dir(), p.as_ref()));
    }

    /// Persist history to `p`. An empty path turns persistence off.
    pub fn set_history_file(&mut self, p: impl Into<PathBuf>) {
        let p = p.into();
        self.config.history_file = if p.as_os_str().is_empty() { None } else { Some(p) };
    }

    pub fn set_prompt(&mut self, p: impl Into<String>) {
        self.config.prompt = p.into();
    }

    pub fn set_interrupt_prompt(&mut self, p: impl Into<String>) {
        self.config.interrupt_prompt = p.into();
    }

    pub fn set_eof_prompt(&mut self, p: impl Into<String>) {
        self.config.eof_prompt = p.into();
    }

    pub fn set_history_search_fold(&mut self, fold: bool) {
        self.config.history_search_fold = fold;
    }

    /// Configuration the next line source will be opened with.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Run one raw input line through the registry.
    pub fn dispatch(&self, line: &str) -> Flow {
        self.handle(&Context::new(line, self))
    }

    fn handle(&self, ctx: &Context<'_>) -> Flow {
        let name = ctx.args()[0].as_str();
        match self.cmds.iter().find(|cmd| cmd.name() == name) {
            Some(cmd) => {
                debug!("dispatching to command {:?}", name);
                cmd.call(ctx)
            }
            None => {
                debug!("no command named {:?}, using default handler", name);
                (self.handler)(ctx)
            }
        }
    }

    /// Invoke the current interrupt handler right away.
    pub fn interrupt(&self) -> Flow {
        (self.interrupt)()
    }

    /// Hand `args` to the default handler, bypassing the registry and the line source.
    pub fn process<I, S>(&self, args: I) -> Flow
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        (self.handler)(&Context::from_args(args, self))
    }

    /// Read and dispatch lines until a handler returns [`Flow::Stop`].
    ///
    /// Failing to open the terminal or to read from it is fatal: the error is
    /// logged and the process exits with status 1.
    pub fn run(&mut self) {
        if let Err(e) = self.try_run() {
            error!("{:#}", e);
            if log::max_level() == LevelFilter::Off {
                eprintln!("{:#}", e);
            }
            process::exit(1);
        }
    }

    /// Like [`Shell::run`], but fatal errors are returned.
    pub fn try_run(&mut self) -> anyhow::Result<()> {
        self.run_with(Readline::open)
    }

    /// Like [`Shell::try_run`] with a custom line source.
    ///
    /// `open` is called with the current configuration unless an earlier run
    /// already opened a line source, which is then reused.
    pub fn run_with<L, F>(&mut self, open: F) -> anyhow::Result<()>
    where
        L: LineSource + 'static,
        F: FnOnce(&LineConfig) -> anyhow::Result<L>,
    {
        let mut reader: Box<dyn LineSource> = match self.reader.take() {
            Some(reader) => reader,
            None => {
                debug!("opening line source with {:?}", self.config);
                Box::new(open(&self.config).context("failed to initialize line source")?)
            }
        };
        let result = self.read_loop(reader.as_mut());
        self.reader = Some(reader);
        result
    }

    fn read_loop(&self, reader: &mut dyn LineSource) -> anyhow::Result<()> {
        loop {
            let flow = match reader.read_line() {
                Ok(line) => self.dispatch(&line),
                Err(ReadError::Interrupted(line)) => {
                    debug!("line source interrupted");
                    match self.interrupt() {
                        Flow::Continue => self.dispatch(&line),
                        Flow::Stop => Flow::Stop,
                    }
                }
                Err(e) => return Err(e.into()),
            };
            if flow == Flow::Stop {
                debug!("run loop stopped by handler");
                return Ok(());
            }
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("cmds", &self.cmds)
            .field("config", &self.config)
            .field("reader_open", &self.reader.is_some())
            .finish_non_exhaustive()
    }
}
