//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Everything the user sees goes through [`Output`]; tracing is for diagnostics only.

use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};

use colored::Colorize;

/// Pair of sinks for regular output and errors.
///
/// Write failures (e.g. a closed pipe) are ignored.
pub struct Output<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Output<Stdout, Stderr> {
    /// Process stdout/stderr
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl Output<Vec<u8>, Vec<u8>> {
    /// In-memory sinks, for tests.
    pub fn buffered() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}

impl<O: Write, E: Write> Output<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Print error (red "✗ Error:" prefix) to stderr
    pub fn error(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.err, "{} {}", "✗ Error:".red(), msg);
    }

    /// Print unrecoverable error (red bold "✗ Fatal error:" prefix) to stderr
    pub fn fatal(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.err, "{} {}", "✗ Fatal error:".red().bold(), msg);
    }

    /// Print warning (yellow "Warning:" prefix) to stderr
    pub fn warning(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.err, "{} {}", "Warning:".yellow(), msg);
    }

    /// Print indented hint to stderr
    pub fn hint(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.err, "  {}", msg);
    }

    /// Print plain line to stderr
    pub fn err_line(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.err, "{}", msg);
    }

    /// Print success status (green checkmark)
    pub fn success(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.out, "{} {}", "✓".green(), msg);
    }

    /// Print diagnostic note (dimmed)
    pub fn note(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.out, "{}", msg.to_string().dimmed());
    }

    /// Print plain output (no color)
    pub fn info(&mut self, msg: &(impl Display + ?Sized)) {
        let _ = writeln!(self.out, "{}", msg);
    }

    pub fn flush(&mut self) {
        self.out.flush().ok();
        self.err.flush().ok();
    }
}
