//! High-level segmentation API

use crate::assembler::{self, Assembler};
use crate::config::Config;
use crate::error::Error;
use crate::input::Input;
use crate::resolver::{self, Resolution};
use crate::rules::RuleSet;
use crate::substitution::{self, SubstitutionTable, SubstitutionTrace};
use std::sync::Arc;

/// Segments text with a compiled rule set and an ordered chain of
/// substitution tables.
///
/// A `Segmenter` is immutable once built and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Arc<RuleSet>,
    tables: Vec<SubstitutionTable>,
    assembler: Assembler,
    config: Config,
}

/// Everything that happened while segmenting one text
#[derive(Debug, Clone)]
pub struct Explanation<'s> {
    /// Substitution steps; `substitution.output()` is the text that was resolved
    pub substitution: SubstitutionTrace,
    /// Candidates that survived, were vetoed, or were superseded.
    /// Spans index into `substitution.output()`.
    pub resolution: Resolution<'s>,
    /// The segmented text
    pub output: String,
}

impl Explanation<'_> {
    /// The text boundaries were resolved against
    pub fn resolved_text(&self) -> &str {
        self.substitution.output()
    }
}

impl Segmenter {
    /// Create a segmenter with the default configuration and no tables
    pub fn new(rules: impl Into<Arc<RuleSet>>) -> Self {
        let config = Config::default();
        Self {
            rules: rules.into(),
            tables: Vec::new(),
            assembler: Assembler::new(config.break_marker()),
            config,
        }
    }

    /// Create a segmenter with a custom configuration
    pub fn with_config(rules: impl Into<Arc<RuleSet>>, config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            rules: rules.into(),
            tables: Vec::new(),
            assembler: Assembler::new(config.break_marker()),
            config,
        })
    }

    /// Compile `source` and create a segmenter for it
    pub fn from_rule_source(source: &str) -> Result<Self, Error> {
        Ok(Self::new(RuleSet::compile(source)?))
    }

    /// Append substitution tables; they run in the order given
    pub fn with_tables(mut self, tables: impl IntoIterator<Item = SubstitutionTable>) -> Self {
        self.tables.extend(tables);
        self
    }

    /// The rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The substitution tables, in application order
    pub fn tables(&self) -> &[SubstitutionTable] {
        &self.tables
    }

    /// The configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Segment `text`, inserting the break marker at every sentence end
    pub fn segment(&self, text: &str) -> String {
        let text = self.substitute(text);
        let resolution = resolver::resolve(&text, &self.rules);
        tracing::debug!(
            boundaries = resolution.boundaries.len(),
            suppressed = resolution.suppressed.len(),
            superseded = resolution.superseded.len(),
            "segmented text"
        );
        self.assembler.assemble(&text, &resolution.boundaries)
    }

    /// Segment `text` and split the result into sentences
    pub fn sentences(&self, text: &str) -> Vec<String> {
        let segmented = self.segment(text);
        assembler::sentences(&segmented, self.assembler.marker())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Segment `text` and keep every intermediate decision
    pub fn explain(&self, text: &str) -> Explanation<'_> {
        let substitution = if self.config.apply_substitutions() {
            substitution::apply_traced(text, &self.tables)
        } else {
            substitution::apply_traced(text, &[])
        };
        let resolution = resolver::resolve(substitution.output(), &self.rules);
        let output = self
            .assembler
            .assemble(substitution.output(), &resolution.boundaries);

        Explanation {
            substitution,
            resolution,
            output,
        }
    }

    /// Read `input` and segment it
    pub fn process(&self, input: Input) -> Result<String, Error> {
        let text = input.into_text()?;
        Ok(self.segment(&text))
    }

    fn substitute(&self, text: &str) -> String {
        if self.config.apply_substitutions() {
            substitution::apply(text, &self.tables)
        } else {
            text.to_string()
        }
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(RuleSet::builtin().clone())
    }
}
