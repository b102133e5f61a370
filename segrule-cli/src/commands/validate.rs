//! Validate command implementation

use crate::rules_source::{load_tables, RuleSource};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Rule file to validate
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,

    /// Substitution tables to validate along with the rules
    #[arg(short = 't', long = "subst", value_name = "FILE")]
    pub subst: Vec<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating rule file: {}", self.rules.display());

        let rules = match RuleSource::File(self.rules.clone()).load() {
            Ok(rules) => rules,
            Err(e) => {
                println!("✗ Rules are invalid!");
                println!("  Error: {e:#}");
                return Err(anyhow::anyhow!("Validation failed: {e:#}"));
            }
        };
        println!("✓ Rules are valid!");
        println!("  Candidate rules: {}", rules.candidates().len());
        println!("  Veto rules: {}", rules.vetoes().len());

        for path in &self.subst {
            match load_tables(std::slice::from_ref(path)) {
                Ok(tables) => {
                    let count: usize = tables.iter().map(|t| t.len()).sum();
                    println!("✓ Substitution table {}: {} rules", path.display(), count);
                }
                Err(e) => {
                    println!("✗ Substitution table {} is invalid!", path.display());
                    println!("  Error: {e:#}");
                    return Err(anyhow::anyhow!("Validation failed: {e:#}"));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            rules: PathBuf::from("test.rules"),
            subst: vec![],
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("test.rules"));
    }

    #[test]
    fn test_validate_valid_rules() {
        let rules = file_with("<do><in>([.!?])\\s+</in><out>\\1\\n</out></do>\n<dont>\\bDr\\.</dont>\n");
        let table = file_with("[“”]\n\"\n");

        let args = ValidateArgs {
            rules: rules.path().to_path_buf(),
            subst: vec![table.path().to_path_buf()],
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_invalid_rules() {
        let rules = file_with("<do>\n<in>(a)</in>\n<out>\\3</out>\n</do>\n");

        let args = ValidateArgs {
            rules: rules.path().to_path_buf(),
            subst: vec![],
        };
        let error = args.execute().unwrap_err();
        assert!(error.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_validate_invalid_table() {
        let rules = file_with("<dont>x</dont>\n");
        let table = file_with("(unclosed\nx\n");

        let args = ValidateArgs {
            rules: rules.path().to_path_buf(),
            subst: vec![table.path().to_path_buf()],
        };
        assert!(args.execute().is_err());
    }
}
