use crate::shell::Shell;

/// One dispatch request: the cleaned input line, its words and the shell it came from.
///
/// Arguments are split on every single space. Repeated spaces produce empty words
/// and leading or trailing spaces are kept, so `"a  b"` becomes `["a", "", "b"]`.
/// There is always at least one argument; an empty line yields `[""]`.
pub struct Context<'a> {
    input: String,
    args: Vec<String>,
    shell: &'a Shell,
}

impl<'a> Context<'a> {
    /// Build a context from a raw line as read from the terminal.
    pub fn new(raw: &str, shell: &'a Shell) -> Self {
        let input: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        let args = input.split(' ').map(str::to_owned).collect();
        Self { input, args, shell }
    }

    /// Build a context from arguments that are already split.
    pub(crate) fn from_args(args: Vec<String>, shell: &'a Shell) -> Self {
        let input = args.join(" ");
        let args = if args.is_empty() {
            vec![String::new()]
        } else {
            args
        };
        Self { input, args, shell }
    }

    /// The input line without line terminators.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The shell that dispatched this context, e.g. to call [`Shell::interrupt`].
    pub fn shell(&self) -> &'a Shell {
        self.shell
    }
}
