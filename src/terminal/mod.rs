//! Line-oriented terminal I/O and terminal mode ownership.
//!
//! Includes:
//! - `LineIo`: the read/write contract the menu loop is written against.
//! - `Terminal`: the concrete adapter over a `LineSource`/`Write` pair (stdio in production).
//! - `session`: capture/restore of the terminal mode and signal-driven release.

pub mod session;

use colored::Colorize;
use std::io::{self, BufRead, Stdin, Stdout, Write};
use tracing::trace;

pub use session::*;

/// Cursor home followed by clear screen.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Semantic tone of a line, used by capable sinks to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The menu title line.
    Header,
    /// Feedback for bad input or failed I/O.
    Error,
    /// Leaving the loop.
    Farewell,
}

/// Line-based read and write primitives used by the menu loop.
///
/// Isolating I/O behind this trait lets the loop run against an in-memory
/// substitute that records writes and supplies scripted reads.
pub trait LineIo {
    /// Writes `text` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying stream error (e.g. broken pipe).
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Blocks until a full `\n`-delimited line is available and returns it without the delimiter.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` when the stream ends before a delimiter, or the read error.
    fn read_line(&mut self) -> io::Result<String>;

    /// Emits the clear-screen escape sequence.
    fn clear_screen(&mut self) -> io::Result<()>;

    /// Writes a line tagged with a tone. Sinks without styling write it as-is.
    fn write_notice(&mut self, _notice: Notice, text: &str) -> io::Result<()> {
        self.write_line(text)
    }
}

/// Source of raw `\n`-terminated lines for a [`Terminal`].
pub trait LineSource {
    /// Appends bytes up to and including the next `\n` to `buf`; returns the count read.
    fn read_line_bytes(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

impl<R: BufRead> LineSource for R {
    fn read_line_bytes(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.read_until(b'\n', buf)
    }
}

/// Process stdin, locked only for the duration of each read.
///
/// Menu actions run between reads and may use `std::io::stdin()` (or a prompt
/// library built on it) themselves.
pub struct SharedStdin(Stdin);

impl SharedStdin {
    pub fn new() -> Self {
        Self(io::stdin())
    }
}

impl Default for SharedStdin {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for SharedStdin {
    fn read_line_bytes(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.0.lock().read_until(b'\n', buf)
    }
}

/// Terminal adapter over an input reader and an output writer.
///
/// When `color` is enabled, notices are styled through `colored`, which still
/// honours `NO_COLOR`/`CLICOLOR` and the global override set by [`crate::ColorChoice`].
pub struct Terminal<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl Terminal<SharedStdin, Stdout> {
    /// Creates a terminal bound to the process's stdin and stdout.
    pub fn stdio(color: bool) -> Self {
        Self::new(SharedStdin::new(), io::stdout(), color)
    }
}

impl<R: LineSource, W: Write> Terminal<R, W> {
    /// Creates a terminal over arbitrary streams.
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Gives access to the output sink, mostly useful when it is an in-memory buffer.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the terminal and returns its streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn paint(&self, notice: Notice, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match notice {
            Notice::Header => text.cyan().bold().to_string(),
            Notice::Error => text.red().to_string(),
            Notice::Farewell => text.green().to_string(),
        }
    }
}

impl<R: LineSource, W: Write> LineIo for Terminal<R, W> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.write_all(b"\n")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.input.read_line_bytes(&mut buf)?;
        if buf.pop() != Some(b'\n') {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        trace!(line = %line, "read line");
        Ok(line)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.output.write_all(CLEAR_SCREEN.as_bytes())?;
        self.output.flush()
    }

    fn write_notice(&mut self, notice: Notice, text: &str) -> io::Result<()> {
        let painted = self.paint(notice, text);
        self.write_line(&painted)
    }
}
