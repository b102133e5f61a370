//! Split command implementation

use super::common::{init_logging, RuleArgs, SegmenterCache};
use crate::config::CliConfig;
use crate::input::{resolve_inputs, FileReader, InputSource};
use crate::output::{HtmlFormatter, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use segrule_core::Segmenter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob); `-` or nothing reads stdin
    #[arg(value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub rule_args: RuleArgs,

    /// Drop blank input lines
    #[arg(short, long)]
    pub strip_empty_lines: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let format = self.format.or(config.output.format).unwrap_or_default();
        let strip_empty_lines = self.strip_empty_lines || config.output.strip_empty_lines;
        let separator = config
            .output
            .break_marker
            .clone()
            .unwrap_or_else(|| "\n".to_string());

        let inputs = resolve_inputs(&self.input)?;
        let mut cache = SegmenterCache::new(self.rule_args.settings(&config));

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match format {
            OutputFormat::Text => Box::new(TextFormatter::with_separator(writer, separator)),
            OutputFormat::Html => Box::new(HtmlFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(inputs.len() as u64);

        formatter.begin()?;
        let mut index = 0;
        for input in &inputs {
            let segmenter = cache.get(input)?;
            let text = match input {
                InputSource::Stdin => FileReader::read_stdin()?,
                InputSource::File(path) => FileReader::read_text(path)?,
            };
            index = split_lines(
                &segmenter,
                &text,
                strip_empty_lines,
                formatter.as_mut(),
                index,
            )?;
            log::debug!("Processed {}", input.display_name());
            progress.file_completed(&input.display_name());
        }
        formatter.finish()?;
        progress.finish();

        log::info!("Wrote {} sentences from {} inputs", index, inputs.len());
        Ok(())
    }
}

/// Segment `text` line by line and hand every sentence to `formatter`.
///
/// A line without sentences (an empty line) is written as one empty
/// sentence unless `strip_empty_lines` is set. Returns the index following
/// the last sentence written.
pub fn split_lines(
    segmenter: &Segmenter,
    text: &str,
    strip_empty_lines: bool,
    formatter: &mut dyn OutputFormatter,
    mut index: usize,
) -> Result<usize> {
    for (number, line) in text.lines().enumerate() {
        if strip_empty_lines && line.trim().is_empty() {
            continue;
        }

        let sentences = segmenter.sentences(line);
        if sentences.is_empty() {
            formatter.format_sentence("", number + 1, index)?;
            index += 1;
            continue;
        }
        for sentence in &sentences {
            formatter.format_sentence(sentence, number + 1, index)?;
            index += 1;
        }
    }
    Ok(index)
}
