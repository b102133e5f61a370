//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Write anything that precedes the first sentence
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// Format and output a single sentence.
    ///
    /// `line` is the 1-based input line the sentence came from and `index`
    /// its 0-based position in the whole output.
    fn format_sentence(&mut self, sentence: &str, line: usize, index: usize) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text with one sentence per line
    #[default]
    Text,
    /// Minimal HTML document with one paragraph per sentence
    Html,
    /// JSON array of sentences with their line and index
    Json,
}

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;
