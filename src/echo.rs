//! Status output for config and launch operations
//!
//! Every operation in this crate reports what it is doing through an [`Echo`]
//! sink instead of writing to a global stream. The default sink writes to
//! stderr and, when a log file is configured, appends the same text there.
//!
//! Message layout:
//! - `msg`: `[YYYY:MM:DD HH:MM:SS] text\n`
//! - `msg_box`: a dashed rule, `| title |`, the rule again, then an optional body

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Timestamp format prefixed to every status line
pub const TIMESTAMP_FORMAT: &str = "[%Y:%m:%d %H:%M:%S] ";

/// Sink for user-facing status text
pub trait Echo {
    /// Write raw text. No newline is appended.
    fn echo(&self, text: &str);

    /// Timestamp prefix for the next status line
    fn timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Write a timestamped status line
pub fn msg(echo: &dyn Echo, text: &str) {
    echo.echo(&format!("{}{}\n", echo.timestamp(), text));
}

/// Write a boxed title, optionally followed by a longer body
pub fn msg_box(echo: &dyn Echo, splash: &str, body: Option<&str>) {
    let rule = "-".repeat(splash.chars().count() + 4);
    msg(echo, &rule);
    msg(echo, &format!("| {} |", splash));
    msg(echo, &rule);
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        echo.echo(&format!("\n{}\n", body));
    }
}

/// Writes to stderr and optionally appends to a log file
#[derive(Debug, Clone, Default)]
pub struct StderrEcho {
    log: Option<PathBuf>,
}

impl StderrEcho {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append every message to `log`
    pub fn with_log(log: impl Into<PathBuf>) -> Self {
        Self {
            log: Some(log.into()),
        }
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_deref()
    }

    fn append_log(path: &Path, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(text.as_bytes())
    }
}

impl Echo for StderrEcho {
    fn echo(&self, text: &str) {
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();

        if let Some(ref path) = self.log {
            if let Err(e) = Self::append_log(path, text) {
                tracing::warn!(log = %path.display(), error = %e, "failed to append to log file");
            }
        }
    }
}

/// Discards all output
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentEcho;

impl Echo for SilentEcho {
    fn echo(&self, _text: &str) {}
}

/// Records output in memory
#[derive(Debug, Default)]
pub struct CaptureEcho {
    buffer: RefCell<String>,
    fixed_timestamp: Option<String>,
}

impl CaptureEcho {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `timestamp` in place of the local clock
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            buffer: RefCell::new(String::new()),
            fixed_timestamp: Some(timestamp.into()),
        }
    }

    /// Everything echoed so far
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Echoed text split into lines
    pub fn lines(&self) -> Vec<String> {
        self.buffer.borrow().lines().map(str::to_string).collect()
    }
}

impl Echo for CaptureEcho {
    fn echo(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    fn timestamp(&self) -> String {
        match self.fixed_timestamp {
            Some(ref ts) => ts.clone(),
            None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_msg_format() {
        let echo = CaptureEcho::with_timestamp("[2022:01:01 00:00:00] ");
        msg(&echo, "This is an error message");
        assert_eq!(
            echo.contents(),
            "[2022:01:01 00:00:00] This is an error message\n"
        );
    }

    #[test]
    fn test_default_timestamp_shape() {
        let echo = CaptureEcho::new();
        let ts = echo.timestamp();
        // "[2022:01:01 00:00:00] "
        assert_eq!(ts.len(), 22);
        assert!(ts.starts_with('['));
        assert!(ts.ends_with("] "));
    }

    #[test]
    fn test_msg_box_layout() {
        let echo = CaptureEcho::with_timestamp("");
        msg_box(&echo, "Error!", Some("line one\nline two"));

        assert_eq!(
            echo.contents(),
            "----------\n| Error! |\n----------\n\nline one\nline two\n"
        );
    }

    #[test]
    fn test_msg_box_without_body() {
        let echo = CaptureEcho::with_timestamp("");
        msg_box(&echo, "Hi", None);
        assert_eq!(echo.lines(), vec!["------", "| Hi |", "------"]);
    }

    #[test]
    fn test_msg_box_empty_body_skipped() {
        let echo = CaptureEcho::with_timestamp("");
        msg_box(&echo, "Hi", Some(""));
        assert_eq!(echo.contents(), "------\n| Hi |\n------\n");
    }

    #[test]
    fn test_stderr_echo_appends_to_log() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("log.txt");
        let echo = StderrEcho::with_log(&log);

        echo.echo("first");
        echo.echo(" second");

        assert_eq!(std::fs::read_to_string(&log).unwrap(), "first second");
        assert_eq!(echo.log_path(), Some(log.as_path()));
    }

    #[test]
    fn test_stderr_echo_bad_log_path_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let echo = StderrEcho::with_log(dir.path().join("missing").join("log.txt"));
        echo.echo("still printed\n");
    }

    #[test]
    fn test_silent_echo() {
        msg_box(&SilentEcho, "quiet", Some("body"));
    }
}
