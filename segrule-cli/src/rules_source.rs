//! Rule and substitution table discovery
//!
//! Without an explicit rule file the CLI looks in the input file's directory
//! and then in the executable's directory for `segrule.rules.<lang>` and then
//! `segrule.rules`. The first file found wins; the bundled rules are used
//! when nothing is found.
//!
//! Substitution tables are only discovered on request. The chain runs
//! pre-tables next to the input, then the explicit tables, then tables next to
//! the executable, then post-tables next to the input.

use crate::error::CliError;
use anyhow::{Context, Result};
use segrule_core::{RuleSet, SubstitutionTable};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name stem of rule files
pub const RULES_FILE: &str = "segrule.rules";

/// File name stem of substitution tables
pub const SUBST_FILE: &str = "segrule.subst";

/// File name stem of substitution tables applied after all others
pub const SUBST_POST_FILE: &str = "segrule.subst.post";

/// Language used when neither `--lang` nor `$LANG` gives one
pub const FALLBACK_LANG: &str = "en";

/// Source of segmentation rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Rule set bundled with the binary
    BuiltIn,
    /// Rule file on disk
    File(PathBuf),
}

impl RuleSource {
    /// Get the display name for the rule source
    pub fn display_name(&self) -> String {
        match self {
            RuleSource::BuiltIn => "Built-in rules".to_string(),
            RuleSource::File(path) => format!("Rule file: {}", path.display()),
        }
    }

    /// Search `dirs` in order for a rule file for `lang`
    pub fn discover(dirs: &[&Path], lang: &str) -> Self {
        for dir in dirs {
            for name in [format!("{RULES_FILE}.{lang}"), RULES_FILE.to_string()] {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    log::debug!("Discovered rule file {}", candidate.display());
                    return RuleSource::File(candidate);
                }
            }
        }
        RuleSource::BuiltIn
    }

    /// Load and compile the rules
    pub fn load(&self) -> Result<RuleSet> {
        match self {
            RuleSource::BuiltIn => Ok(RuleSet::builtin().clone()),
            RuleSource::File(path) => {
                if !path.is_file() {
                    return Err(CliError::FileNotFound(path.display().to_string()).into());
                }
                let source = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
                RuleSet::compile(&source)
                    .map_err(|e| CliError::RulesError(format!("{}: {e}", path.display())))
                    .with_context(|| format!("Failed to compile rule file: {}", path.display()))
            }
        }
    }
}

/// Ordered substitution table paths for an input in `input_dir`.
///
/// Discovered files that do not exist are skipped; explicit files are kept
/// so that a missing one is reported when loading.
pub fn substitution_chain(
    input_dir: &Path,
    exe_dir: Option<&Path>,
    lang: &str,
    explicit: &[PathBuf],
) -> Vec<PathBuf> {
    let localized = |dir: &Path, stem: &str| [dir.join(format!("{stem}.{lang}")), dir.join(stem)];

    let mut chain: Vec<PathBuf> = localized(input_dir, SUBST_FILE)
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    chain.extend(explicit.iter().cloned());
    if let Some(exe_dir) = exe_dir {
        chain.extend(
            localized(exe_dir, SUBST_FILE)
                .into_iter()
                .filter(|p| p.is_file()),
        );
    }
    chain.extend(
        localized(input_dir, SUBST_POST_FILE)
            .into_iter()
            .filter(|p| p.is_file()),
    );
    chain
}

/// Load substitution tables in order
pub fn load_tables(paths: &[PathBuf]) -> Result<Vec<SubstitutionTable>> {
    paths
        .iter()
        .map(|path| -> Result<SubstitutionTable> {
            if !path.is_file() {
                return Err(CliError::FileNotFound(path.display().to_string()).into());
            }
            log::debug!("Loading substitution table {}", path.display());
            SubstitutionTable::from_file(path)
                .map_err(|e| CliError::RulesError(e.to_string()))
                .with_context(|| format!("Failed to load substitution table: {}", path.display()))
        })
        .collect()
}

/// Language for discovery: the first two letters of `$LANG`, or `en`
pub fn default_lang() -> String {
    lang_from_locale(env::var("LANG").ok().as_deref())
}

fn lang_from_locale(locale: Option<&str>) -> String {
    locale
        .map(|l| l.chars().take(2).collect::<String>())
        .filter(|l| l.len() == 2 && l.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|l| l.to_ascii_lowercase())
        .unwrap_or_else(|| FALLBACK_LANG.to_string())
}

/// Directory holding the running executable
pub fn exe_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
