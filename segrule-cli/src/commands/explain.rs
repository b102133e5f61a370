//! Explain command implementation

use super::common::{init_logging, input_dir, RuleArgs};
use crate::config::CliConfig;
use crate::input::{FileReader, InputSource};
use crate::rules_source::{self, RuleSource};
use anyhow::Result;
use clap::Args;
use segrule_core::{Explanation, Segmenter, Span};
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the explain command
#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Text to explain (default: read from --input or stdin)
    #[arg(value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub rule_args: RuleArgs,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExplainArgs {
    /// Execute the explain command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let source = match &self.input {
            Some(path) => InputSource::File(path.clone()),
            None => InputSource::Stdin,
        };
        let text = match (&self.text, &source) {
            (Some(text), _) => text.clone(),
            (None, InputSource::File(path)) => FileReader::read_text(path)?,
            (None, InputSource::Stdin) => FileReader::read_stdin()?,
        };

        let exe_dir = rules_source::exe_dir();
        let (rule_source, segmenter) = self
            .rule_args
            .settings(&config)
            .build(&input_dir(&source), exe_dir.as_deref())?;

        let explanation = segmenter.explain(&text);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(&mut out, &rule_source, &segmenter, &explanation)?;
        out.flush()?;
        Ok(())
    }
}

/// Write a human-readable account of `explanation`
pub fn write_report(
    out: &mut dyn Write,
    rule_source: &RuleSource,
    segmenter: &Segmenter,
    explanation: &Explanation<'_>,
) -> Result<()> {
    let rules = segmenter.rules();
    writeln!(
        out,
        "Rules: {} ({} candidate, {} veto)",
        rule_source.display_name(),
        rules.candidates().len(),
        rules.vetoes().len()
    )?;

    writeln!(out, "\nSubstitutions:")?;
    if explanation.substitution.is_unchanged() {
        writeln!(out, "  (none)")?;
    }
    for step in &explanation.substitution.steps {
        writeln!(
            out,
            "  {} #{}: {:?} -> {:?}",
            step.table, step.ordinal, step.pattern, step.replacement
        )?;
        writeln!(out, "    = {:?}", step.result)?;
    }

    let text = explanation.resolved_text();
    let excerpt = |span: Span| format!("{:?}", &text[span.range()]);

    writeln!(out, "\nBoundaries:")?;
    if explanation.resolution.boundaries.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for boundary in &explanation.resolution.boundaries {
        writeln!(
            out,
            "  {} {} {}",
            boundary.span,
            boundary.rule.id(),
            excerpt(boundary.span)
        )?;
    }

    if !explanation.resolution.suppressed.is_empty() {
        writeln!(out, "\nVetoed:")?;
    }
    for suppression in &explanation.resolution.suppressed {
        writeln!(
            out,
            "  {} {} {} vetoed by {} at {} {}",
            suppression.candidate.span,
            suppression.candidate.rule.id(),
            excerpt(suppression.candidate.span),
            suppression.veto.rule.id(),
            suppression.veto.span,
            excerpt(suppression.veto.span)
        )?;
    }

    if !explanation.resolution.superseded.is_empty() {
        writeln!(out, "\nSuperseded:")?;
    }
    for candidate in &explanation.resolution.superseded {
        writeln!(
            out,
            "  {} {} {}",
            candidate.span,
            candidate.rule.id(),
            excerpt(candidate.span)
        )?;
    }

    writeln!(out, "\nOutput:")?;
    for line in explanation.output.lines() {
        writeln!(out, "  {line}")?;
    }

    Ok(())
}
