//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs each sentence followed by a separator
pub struct TextFormatter<W: Write> {
    writer: W,
    separator: String,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter writing one sentence per line
    pub fn new(writer: W) -> Self {
        Self::with_separator(writer, "\n")
    }

    /// Create a text formatter that ends every sentence with `separator`
    pub fn with_separator(writer: W, separator: impl Into<String>) -> Self {
        Self {
            writer,
            separator: separator.into(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, sentence: &str, _line: usize, _index: usize) -> Result<()> {
        write!(self.writer, "{}{}", sentence, self.separator)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
