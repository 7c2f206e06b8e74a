use crate::context::Context;
use std::fmt;

/// What the run loop should do once a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Read the next line.
    #[default]
    Continue,
    /// Leave the run loop; [`Shell::run`](crate::Shell::run) returns normally.
    Stop,
}

/// Handlers written as plain side-effect code keep the loop going.
impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

/// Handler invoked with the context of one dispatch.
pub type Handler = Box<dyn Fn(&Context<'_>) -> Flow>;

/// Handler invoked when the line source reports an interrupt.
pub type InterruptHandler = Box<dyn Fn() -> Flow>;

pub(crate) fn boxed_handler<F, R>(f: F) -> Handler
where
    F: Fn(&Context<'_>) -> R + 'static,
    R: Into<Flow>,
{
    Box::new(move |ctx: &Context<'_>| -> Flow { f(ctx).into() })
}

pub(crate) fn boxed_interrupt<F, R>(f: F) -> InterruptHandler
where
    F: Fn() -> R + 'static,
    R: Into<Flow>,
{
    Box::new(move || -> Flow { f().into() })
}

/// A named action registered with a [`Shell`](crate::Shell).
///
/// The name is matched exactly against the first word of the input. The help text
/// is never interpreted by the shell itself.
pub struct Command {
    name: String,
    help: String,
    handler: Handler,
}

impl Command {
    /// Create a command. The handler may return `()` or a [`Flow`].
    pub fn new<F, R>(name: impl Into<String>, help: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> R + 'static,
        R: Into<Flow>,
    {
        Self {
            name: name.into(),
            help: help.into(),
            handler: boxed_handler(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub(crate) fn call(&self, ctx: &Context<'_>) -> Flow {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shell;

    #[test]
    fn test_unit_handler_continues() {
        let cmd = Command::new("noop", "does nothing", |_ctx| {});
        let sh = Shell::new();
        let ctx = Context::new("noop", &sh);
        assert_eq!(cmd.call(&ctx), Flow::Continue);
    }

    #[test]
    fn test_flow_handler_result_is_kept() {
        let cmd = Command::new("quit", "leave the shell", |_ctx| Flow::Stop);
        let sh = Shell::new();
        let ctx = Context::new("quit", &sh);
        assert_eq!(cmd.call(&ctx), Flow::Stop);
    }

    #[test]
    fn test_debug_shows_name_and_help() {
        let cmd = Command::new("ls", "list things", |_ctx| {});
        let s = format!("{:?}", cmd);
        assert!(s.contains("\"ls\""));
        assert!(s.contains("\"list things\""));
    }
}
