//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Where a piece of input text comes from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InputSource {
    /// Standard input, written as `-`
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Name used in log messages and progress output
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Resolve file patterns to input sources.
///
/// No patterns means standard input; `-` may also be given explicitly.
/// Sources keep the order of their patterns, and a source named twice is
/// read once, at its first position.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    if patterns.is_empty() {
        return Ok(vec![InputSource::Stdin]);
    }

    let mut sources: Vec<InputSource> = Vec::new();
    for pattern in patterns {
        let resolved = if pattern == "-" {
            vec![InputSource::Stdin]
        } else {
            resolve_patterns(std::slice::from_ref(pattern))?
                .into_iter()
                .map(InputSource::File)
                .collect()
        };
        for source in resolved {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
    }

    Ok(sources)
}

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern)
            .map_err(|_| CliError::InvalidPattern(pattern.clone()))
            .with_context(|| format!("Invalid glob pattern: {pattern}"))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::FileNotFound(patterns.join(", ")))
            .context("No files found matching the provided patterns");
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}
