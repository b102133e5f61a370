//! Substitution tables and their file format
//!
//! A table file is a list of blocks separated by blank lines. The first line
//! of a block is the pattern, the second the replacement; a block without a
//! second line deletes what its pattern matches. Lines starting with `#` are
//! comments and separate blocks like blank lines do.
//!
//! ```text
//! # straight quotes
//! [“”]
//! "
//!
//! # drop soft hyphens
//! \x{AD}
//! ```

use super::replacement::Replacement;
use crate::error::SubstitutionError;
use fancy_regex::Regex;
use std::fs;
use std::path::Path;

/// One pattern/replacement pair
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub(crate) pattern: Regex,
    pub(crate) replacement: Replacement,
}

impl SubstitutionRule {
    /// The compiled pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The replacement
    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }
}

/// Named, ordered list of substitution rules
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    name: String,
    rules: Vec<SubstitutionRule>,
}

impl SubstitutionTable {
    /// Build a table from pattern/replacement pairs, in order
    pub fn new<I, P, R>(name: impl Into<String>, pairs: I) -> Result<Self, SubstitutionError>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let name = name.into();
        let rules = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (pattern, replacement))| {
                let pattern = pattern.as_ref();
                let regex = Regex::new(pattern).map_err(|e| SubstitutionError::InvalidPattern {
                    table: name.clone(),
                    ordinal: index + 1,
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
                Ok(SubstitutionRule {
                    pattern: regex,
                    replacement: Replacement::new(replacement.as_ref()),
                })
            })
            .collect::<Result<Vec<_>, SubstitutionError>>()?;

        Ok(Self { name, rules })
    }

    /// Parse a table in the block file format
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, SubstitutionError> {
        let name = name.into();
        let pairs = parse_blocks(&name, source);
        Self::new(name, pairs)
    }

    /// Load a table file; the table is named after its path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SubstitutionError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SubstitutionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path.display().to_string(), &source)
    }

    /// Name of the table (usually its file path)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in application order
    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_blocks(name: &str, source: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    let mut close = |block: &mut Vec<&str>| {
        if block.is_empty() {
            return;
        }
        if block.len() > 2 {
            tracing::warn!(
                table = name,
                pattern = block[0],
                ignored = block.len() - 2,
                "substitution block has extra lines"
            );
        }
        let replacement = block.get(1).copied().unwrap_or_default();
        pairs.push((block[0].to_string(), replacement.to_string()));
        block.clear();
    };

    for line in source.lines() {
        let line = line.strip_prefix('\u{feff}').unwrap_or(line);
        if line.trim().is_empty() || line.starts_with('#') {
            close(&mut block);
        } else {
            block.push(line);
        }
    }
    close(&mut block);

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_blocks() {
        let source = "# quotes\n[“”]\n\"\n\n\n# hyphens\n\\x{AD}\n\n-{2,}\n—\n";
        let table = SubstitutionTable::parse("test", source).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rules()[0].pattern().as_str(), "[“”]");
        assert_eq!(table.rules()[0].replacement().as_str(), "\"");
        assert!(table.rules()[1].replacement().is_deletion());
        assert_eq!(table.rules()[2].replacement().as_str(), "—");
    }

    #[test]
    fn test_comment_separates_blocks() {
        let table = SubstitutionTable::parse("t", "a\nb\n# next\nc\nd\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rules()[1].pattern().as_str(), "c");
    }

    #[test]
    fn test_extra_lines_are_ignored() {
        let table = SubstitutionTable::parse("t", "a\nb\nc\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rules()[0].replacement().as_str(), "b");
    }

    #[test]
    fn test_invalid_pattern_names_table_and_rule() {
        let result = SubstitutionTable::parse("quotes.subst", "ok\nfine\n\n(unclosed\nx\n");
        match result {
            Err(SubstitutionError::InvalidPattern {
                table,
                ordinal,
                pattern,
                ..
            }) => {
                assert_eq!(table, "quotes.subst");
                assert_eq!(ordinal, 2);
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "colour\ncolor\n").unwrap();

        let table = SubstitutionTable::from_file(file.path()).unwrap();
        assert_eq!(table.name(), file.path().display().to_string());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_from_missing_file() {
        let result = SubstitutionTable::from_file("/nonexistent/table.subst");
        assert!(matches!(result, Err(SubstitutionError::Io { .. })));
    }

    #[test]
    fn test_dollar_replacement_through_table() {
        let table = SubstitutionTable::new("t", [("USD", "US$dollars")]).unwrap();
        assert_eq!(crate::substitution::apply("5 USD", &[table]), "5 US$dollars");
    }

    #[test]
    fn test_new_from_pairs() {
        let table = SubstitutionTable::new("inline", [("a", "b"), ("c", "")]).unwrap();
        assert_eq!(table.name(), "inline");
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
