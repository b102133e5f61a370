//! HTML output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// HTML formatter - wraps every sentence in a paragraph of a minimal document
pub struct HtmlFormatter<W: Write> {
    writer: W,
}

impl<W: Write> HtmlFormatter<W> {
    /// Create a new HTML formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for HtmlFormatter<W> {
    fn begin(&mut self) -> Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html>")?;
        writeln!(self.writer, "  <head>")?;
        writeln!(self.writer, "    <meta charset=\"utf-8\">")?;
        writeln!(self.writer, "  </head>")?;
        writeln!(self.writer, "  <body>")?;
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &str, _line: usize, _index: usize) -> Result<()> {
        writeln!(self.writer, "    <p>{}</p>", escape(sentence))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "  </body>")?;
        writeln!(self.writer, "</html>")?;
        self.writer.flush()?;
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_document() {
        let mut buffer = Vec::new();
        {
            let mut formatter = HtmlFormatter::new(&mut buffer);
            formatter.begin().unwrap();
            formatter.format_sentence("Tom & Jerry <ran>.", 1, 0).unwrap();
            formatter.finish().unwrap();
        }

        let html = String::from_utf8(buffer).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
        assert!(html.contains("    <p>Tom &amp; Jerry &lt;ran&gt;.</p>\n"));
        assert!(html.ends_with("  </body>\n</html>\n"));
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
    }
}
