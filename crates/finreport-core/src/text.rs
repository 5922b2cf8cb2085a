use std::io::{self, Stdout, Write};

use crate::error::SinkError;

pub trait TextSink {
    fn emit(&mut self, lines: &[String]) -> Result<(), SinkError>;
}

/// Writes one line per entry to any [`Write`] target.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl WriterSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TextSink for WriterSink<W> {
    fn emit(&mut self, lines: &[String]) -> Result<(), SinkError> {
        for line in lines {
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
