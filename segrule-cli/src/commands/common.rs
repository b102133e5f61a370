//! Arguments and setup shared by several commands

use crate::config::CliConfig;
use crate::input::InputSource;
use crate::rules_source::{self, RuleSource};
use anyhow::Result;
use clap::Args;
use segrule_core::Segmenter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rule and substitution selection
#[derive(Debug, Clone, Default, Args)]
pub struct RuleArgs {
    /// Rule file (default: discovered next to the input, else built-in rules)
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Language suffix for rule and table discovery (default: from $LANG)
    #[arg(long, value_name = "CODE", env = "SEGRULE_LANG")]
    pub lang: Option<String>,

    /// Substitution table applied before segmentation (repeatable, in order)
    #[arg(short = 't', long = "subst", value_name = "FILE")]
    pub subst: Vec<PathBuf>,

    /// Also load segrule.subst* tables found next to the input and the executable
    #[arg(long)]
    pub discover_subst: bool,
}

/// Rule selection after merging the command line with the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    /// Explicit rule file
    pub rules: Option<PathBuf>,
    /// Language suffix for discovery
    pub lang: String,
    /// Explicit substitution tables
    pub subst: Vec<PathBuf>,
    /// Whether substitution tables are discovered
    pub discover_subst: bool,
}

impl RuleArgs {
    /// Merge with `config`; command-line values win
    pub fn settings(&self, config: &CliConfig) -> RuleSettings {
        let subst = if self.subst.is_empty() {
            config.substitution.files.clone()
        } else {
            self.subst.clone()
        };

        RuleSettings {
            rules: self.rules.clone().or_else(|| config.rules.path.clone()),
            lang: self
                .lang
                .clone()
                .or_else(|| config.rules.lang.clone())
                .unwrap_or_else(rules_source::default_lang),
            subst,
            discover_subst: self.discover_subst || config.substitution.discover,
        }
    }
}

impl RuleSettings {
    /// Rule source for an input located in `input_dir`
    pub fn rule_source(&self, input_dir: &Path, exe_dir: Option<&Path>) -> RuleSource {
        match &self.rules {
            Some(path) => RuleSource::File(path.clone()),
            None => {
                let mut dirs = vec![input_dir];
                dirs.extend(exe_dir);
                RuleSource::discover(&dirs, &self.lang)
            }
        }
    }

    /// Substitution tables for an input located in `input_dir`, in order
    pub fn table_paths(&self, input_dir: &Path, exe_dir: Option<&Path>) -> Vec<PathBuf> {
        if self.discover_subst {
            rules_source::substitution_chain(input_dir, exe_dir, &self.lang, &self.subst)
        } else {
            self.subst.clone()
        }
    }

    /// Build a segmenter for an input located in `input_dir`
    pub fn build(&self, input_dir: &Path, exe_dir: Option<&Path>) -> Result<(RuleSource, Segmenter)> {
        let source = self.rule_source(input_dir, exe_dir);
        let rules = source.load()?;
        let tables = rules_source::load_tables(&self.table_paths(input_dir, exe_dir))?;

        log::info!(
            "Using {} ({} rules, {} substitution tables)",
            source.display_name(),
            rules.len(),
            tables.len()
        );

        Ok((source, Segmenter::new(rules).with_tables(tables)))
    }

    /// Whether the segmenter depends on the input's directory
    fn is_location_dependent(&self) -> bool {
        self.rules.is_none() || self.discover_subst
    }
}

/// Segmenters keyed by input directory, so that files in the same directory
/// share one compiled rule set
pub struct SegmenterCache {
    settings: RuleSettings,
    exe_dir: Option<PathBuf>,
    segmenters: HashMap<PathBuf, Arc<Segmenter>>,
}

impl SegmenterCache {
    /// Create an empty cache
    pub fn new(settings: RuleSettings) -> Self {
        Self {
            settings,
            exe_dir: rules_source::exe_dir(),
            segmenters: HashMap::new(),
        }
    }

    /// Segmenter for `input`
    pub fn get(&mut self, input: &InputSource) -> Result<Arc<Segmenter>> {
        let dir = input_dir(input);
        let key = if self.settings.is_location_dependent() {
            dir.clone()
        } else {
            PathBuf::new()
        };

        if let Some(segmenter) = self.segmenters.get(&key) {
            return Ok(Arc::clone(segmenter));
        }

        let (_, segmenter) = self.settings.build(&dir, self.exe_dir.as_deref())?;
        let segmenter = Arc::new(segmenter);
        self.segmenters.insert(key, Arc::clone(&segmenter));
        Ok(segmenter)
    }
}

/// Directory used for discovery: the file's directory, or `.` for stdin
pub fn input_dir(input: &InputSource) -> PathBuf {
    match input {
        InputSource::File(path) => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
        InputSource::Stdin => PathBuf::from("."),
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A second initialization (e.g. in tests) keeps the first logger
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}
