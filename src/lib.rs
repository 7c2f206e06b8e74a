//! A tiny, embeddable interactive command shell.
//!
//! A [`Shell`] holds an ordered list of named [`Command`]s. Each input line is split
//! into a [`Context`] and handed to the first command whose name equals the first
//! word, or to the default handler when nothing matches. Lines come from a
//! [`LineSource`]; the interactive one is backed by `rustyline`.
//!
//! Handlers can also be driven without a terminal: [`Shell::dispatch`] runs one
//! line through the registry and [`Shell::process`] hands pre-split arguments
//! straight to the default handler.
//!
//! Example
//! ```
//! use shell_dispatch::{Command, Shell};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let mut sh = Shell::new();
//! sh.add_cmd(Command::new("echo", "print arguments", move |ctx| {
//!     sink.borrow_mut().push(ctx.args()[1..].join(" "));
//! }));
//! sh.dispatch("echo hello world");
//!
//! assert_eq!(seen.borrow().as_slice(), ["hello world"]);
//! ```

pub mod builtin;
pub mod command;
mod context;
pub mod home;
pub mod line_source;
pub mod readline;
mod shell;

pub use command::{Command, Flow};
pub use context::Context;
pub use line_source::{LineConfig, LineSource, ReadError};
pub use shell::{DEFAULT_HANDLER_MESSAGE, FAREWELL_MESSAGE, Shell};
