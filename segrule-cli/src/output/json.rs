//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs sentences as JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentenceData {
    /// The sentence text
    pub text: String,
    /// 1-based input line the sentence came from
    pub line: usize,
    /// 0-based position of the sentence in the output
    pub index: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, sentence: &str, line: usize, index: usize) -> Result<()> {
        self.sentences.push(SentenceData {
            text: sentence.to_string(),
            line,
            index,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer);
            formatter.format_sentence("He said \"hi.\"", 1, 0).unwrap();
            formatter.format_sentence("Bye.", 2, 1).unwrap();
            formatter.finish().unwrap();
        }

        let parsed: Vec<SentenceData> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(
            parsed,
            vec![
                SentenceData {
                    text: "He said \"hi.\"".to_string(),
                    line: 1,
                    index: 0
                },
                SentenceData {
                    text: "Bye.".to_string(),
                    line: 2,
                    index: 1
                },
            ]
        );
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let mut buffer = Vec::new();
        JsonFormatter::new(&mut buffer).finish().unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }
}
