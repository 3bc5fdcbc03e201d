//! Append-only token list for an external invocation

use std::fmt;

/// Ordered command tokens: program first, then arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    tokens: Vec<String>,
}

impl CommandSpec {
    /// Start a command with its program name
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Append one token. Numbers are rendered in decimal.
    pub fn arg(&mut self, token: impl ToString) -> &mut Self {
        self.tokens.push(token.to_string());
        self
    }

    /// Append tokens verbatim, in order
    pub fn args<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tokens
            .extend(tokens.into_iter().map(|t| t.as_ref().to_string()));
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// True when `flag` appears as a token, either bare or as `flag=value`
    pub fn contains_flag(&self, flag: &str) -> bool {
        has_flag(&self.tokens, flag)
    }

    /// Tokens joined by single spaces, for execution through a shell
    pub fn to_shell_string(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// True when `flag` appears in `tokens`, either bare or as `flag=value`
pub(crate) fn has_flag<S: AsRef<str>>(tokens: &[S], flag: &str) -> bool {
    tokens.iter().any(|t| {
        let t = t.as_ref();
        t == flag
            || t.strip_prefix(flag)
                .is_some_and(|rest| rest.starts_with('='))
    })
}
