//! Structured representation of one external process invocation.

use std::fmt;

/// One external command: a program and its ordered arguments.
///
/// Commands are built by pure functions and only rendered to a command line at
/// the execution boundary or for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build a command from raw tokens, dropping absent entries.
    ///
    /// The first present token is the program. Returns `None` when every token
    /// is absent.
    pub fn from_tokens<I, T>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<String>,
    {
        let mut present = tokens.into_iter().flatten().map(Into::into);
        let program = present.next()?;
        Some(Self {
            program,
            args: present.collect(),
        })
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append an argument only when present
    pub fn opt_arg<T: Into<String>>(mut self, arg: Option<T>) -> Self {
        if let Some(arg) = arg {
            self.args.push(arg.into());
        }
        self
    }

    /// Program name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// Render as a shell-quoted command line
    pub fn render(&self) -> String {
        self.tokens().map(shell_escape).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Quote a token for POSIX shells
pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@%+".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}
