//! Output sink capability.
//!
//! The tracker owns one terminal line between construction and close.
//! The sink abstracts that line: draw overwrites it in place, finish
//! releases it with a trailing newline.

use std::io::{self, Write};

/// One exclusively-owned terminal line.
pub trait FrameSink {
    /// Overwrite the current line with `frame` (no trailing newline).
    fn draw(&mut self, frame: &str) -> io::Result<()>;

    /// Release the line with a single trailing newline.
    fn finish(&mut self) -> io::Result<()>;
}

/// A [`FrameSink`] over any writer, carriage-return line overwrite.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl TerminalSink<io::Stdout> {
    /// Sink over standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink over an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        write!(self.out, "\r{}", frame)?;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}
