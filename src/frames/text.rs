//! Human-readable frame output.

use std::io::{self, Write};

use crate::compute::Field;

/// Writes frames as delimited text, one line per `x` and a blank line per frame.
///
/// The first frame is preceded by a `"width, height"` header line.
pub struct TextWriter<W: Write> {
    out: W,
    header_written: bool,
    frames_written: u64,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
            frames_written: 0,
        }
    }

    /// Write the live buffer of `field`.
    pub fn write_frame(&mut self, field: &Field) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.out, "{}, {}", field.width(), field.height())?;
            self.header_written = true;
        }

        for row in field.field().chunks_exact(field.height()) {
            let mut values = row.iter();
            if let Some(first) = values.next() {
                write!(self.out, "{}", first)?;
            }
            for v in values {
                write!(self.out, ", {}", v)?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;

        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
