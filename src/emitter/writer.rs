//! Buffered output with an explicit running byte counter.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered writer that counts every byte handed to it.
///
/// The counter covers buffered bytes too, so it is always ahead of (or equal
/// to) what has reached the file. [`SizedWriter::flush`] pushes the buffer down.
pub struct SizedWriter<W: Write> {
    inner: BufWriter<W>,
    bytes: u64,
    flushes: u64,
}

impl SizedWriter<File> {
    /// Create (or truncate) the output file.
    pub fn create(path: &Path) -> io::Result<SizedWriter<File>> {
        let file = File::create(path)?;
        log::debug!("Opened output file {}", path.display());
        Ok(SizedWriter::new(file))
    }
}

impl<W: Write> SizedWriter<W> {
    pub fn new(inner: W) -> SizedWriter<W> {
        SizedWriter {
            inner: BufWriter::new(inner),
            bytes: 0,
            flushes: 0,
        }
    }

    /// Write one complete segment.
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())?;
        self.bytes += s.len() as u64;
        Ok(())
    }

    /// Bytes written so far, buffered or not.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        self.flushes += 1;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush()?;
        log::debug!(
            "Output finished: {} bytes, {} flushes",
            self.bytes,
            self.flushes
        );
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}
