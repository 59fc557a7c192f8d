//! Output buffering.
//!
//! A whole repaint is accumulated here and handed to the terminal in one
//! write, so the terminal never observes a half-drawn frame.

use std::io::{self, Write};

/// Bytes of one frame, waiting to be written.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
}

impl OutputBuffer {
    /// Room for a typical selector frame without reallocating.
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    /// Hand the buffered bytes to `writer` and flush it.
    ///
    /// The buffer is emptied only after the write succeeded.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.bytes.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.bytes)?;
        writer.flush()?;
        self.bytes.clear();
        Ok(())
    }

    /// Everything written so far. Only `str` and ANSI writers feed the
    /// buffer, so the bytes are valid UTF-8; anything else is replaced.
    pub fn into_string(self) -> String {
        String::from_utf8(self.bytes)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    // Real output goes through flush_to.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
