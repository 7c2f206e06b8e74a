//! The boundary between the shell and whatever produces input lines.

use std::path::PathBuf;
use thiserror::Error;

/// Why [`LineSource::read_line`] did not produce a line.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The user asked to interrupt (Ctrl-C). Routed to the interrupt handler; the
    /// text typed so far is dispatched if that handler returns [`Flow::Continue`].
    ///
    /// [`Flow::Continue`]: crate::Flow::Continue
    #[error("interrupted")]
    Interrupted(String),
    /// No more input (Ctrl-D or a closed stream).
    #[error("end of input")]
    Eof,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Produces one logical input line per call.
pub trait LineSource {
    fn read_line(&mut self) -> Result<String, ReadError>;
}

impl<T: LineSource + ?Sized> LineSource for Box<T> {
    fn read_line(&mut self) -> Result<String, ReadError> {
        (**self).read_line()
    }
}

/// Options a line source is opened with.
///
/// The shell hands a snapshot of this to the line source once, when the run loop
/// starts. Later changes only affect line sources opened afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConfig {
    /// Shown before each read.
    pub prompt: String,
    /// Where history is persisted; `None` keeps history in memory only.
    pub history_file: Option<PathBuf>,
    /// Printed when a read is interrupted.
    pub interrupt_prompt: String,
    /// Printed when input ends.
    pub eof_prompt: String,
    /// Case-insensitive history search. [`Readline`](crate::readline::Readline)
    /// ignores it, since rustyline has no such switch.
    pub history_search_fold: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            prompt: "\x1b[31m→ \x1b[0m".to_string(),
            history_file: None,
            interrupt_prompt: "^C".to_string(),
            eof_prompt: "exit".to_string(),
            history_search_fold: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<&'static str>);

    impl LineSource for Fixed {
        fn read_line(&mut self) -> Result<String, ReadError> {
            if self.0.is_empty() {
                Err(ReadError::Eof)
            } else {
                Ok(self.0.remove(0).to_string())
            }
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = LineConfig::default();
        assert!(cfg.prompt.contains("→ "));
        assert_eq!(cfg.history_file, None);
        assert_eq!(cfg.interrupt_prompt, "^C");
        assert_eq!(cfg.eof_prompt, "exit");
        assert!(cfg.history_search_fold);
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut src: Box<dyn LineSource> = Box::new(Fixed(vec!["one"]));
        assert_eq!(src.read_line().unwrap(), "one");
        assert!(matches!(src.read_line(), Err(ReadError::Eof)));
    }

    #[test]
    fn test_other_error_message_is_transparent() {
        let err = ReadError::from(anyhow::anyhow!("tty gone"));
        assert_eq!(err.to_string(), "tty gone");
    }
}
