//! Interactive [`LineSource`] on top of `rustyline`.

use crate::line_source::{LineConfig, LineSource, ReadError};
use anyhow::Context;
use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::io::ErrorKind;

/// Terminal line editor with optional file-backed history.
pub struct Readline {
    editor: DefaultEditor,
    config: LineConfig,
}

impl Readline {
    /// Open the editor and load history from `config.history_file`, if any.
    ///
    /// A missing history file is fine; it is created on the first saved line.
    pub fn open(config: &LineConfig) -> anyhow::Result<Self> {
        let rl_config = Config::builder().auto_add_history(false).build();
        let mut editor =
            DefaultEditor::with_config(rl_config).context("failed to create line editor")?;

        if let Some(path) = &config.history_file {
            match editor.load_history(path) {
                Ok(()) => debug!("loaded history from {}", path.display()),
                Err(ReadlineError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    debug!("no history at {} yet", path.display())
                }
                Err(e) => warn!("can't load history from {}: {}", path.display(), e),
            }
        }

        Ok(Self {
            editor,
            config: config.clone(),
        })
    }

    fn remember(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if let Err(e) = self.editor.add_history_entry(line) {
            warn!("can't add history entry: {}", e);
            return;
        }
        if let Some(path) = &self.config.history_file {
            if let Err(e) = self.editor.save_history(path) {
                warn!("can't save history to {}: {}", path.display(), e);
            }
        }
    }
}

impl LineSource for Readline {
    fn read_line(&mut self) -> Result<String, ReadError> {
        match self.editor.readline(&self.config.prompt) {
            Ok(line) => {
                self.remember(&line);
                Ok(line)
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", self.config.interrupt_prompt);
                // rustyline drops the edit buffer on Ctrl-C.
                Err(ReadError::Interrupted(String::new()))
            }
            Err(ReadlineError::Eof) => {
                println!("{}", self.config.eof_prompt);
                Err(ReadError::Eof)
            }
            Err(e) => Err(ReadError::Other(anyhow::Error::new(e).context("failed to read line"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_history(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("shell_dispatch_{}_{}_{}", tag, std::process::id(), nanos))
    }

    fn config_with(path: &PathBuf) -> LineConfig {
        LineConfig {
            history_file: Some(path.clone()),
            ..LineConfig::default()
        }
    }

    #[test]
    fn test_history_survives_reopen() {
        let path = temp_history("reopen");
        let cfg = config_with(&path);

        let mut first = Readline::open(&cfg).unwrap();
        first.remember("echo one");
        first.remember("   ");
        drop(first);

        let mut second = Readline::open(&cfg).unwrap();
        second.remember("echo two");
        drop(second);

        let saved = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        let one = saved.find("echo one").unwrap();
        let two = saved.find("echo two").unwrap();
        assert!(one < two);
        assert!(!saved.lines().any(|l| l == "   "));
    }

    #[test]
    fn test_missing_history_file_is_not_an_error() {
        let path = temp_history("missing");
        assert!(!path.exists());

        let mut rl = Readline::open(&config_with(&path)).unwrap();
        assert!(!path.exists());

        rl.remember("help");
        let saved = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(saved.contains("help"));
    }
}
