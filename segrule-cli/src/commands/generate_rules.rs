//! Generate rules command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use segrule_core::RuleSet;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-rules command
#[derive(Debug, Args)]
pub struct GenerateRulesArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateRulesArgs {
    /// Execute the generate-rules command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating rule file template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, RuleSet::builtin_source())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Rule file generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the <do> and <dont> rules to fit your texts");
        println!("2. Validate your rules:");
        println!("   segrule validate {}", self.output.display());
        println!("3. Use them for splitting:");
        println!("   segrule split --rules {} input.txt", self.output.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_rules_compile() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("segrule.rules");

        let args = GenerateRulesArgs {
            output: output_path.clone(),
            force: false,
        };
        assert!(args.execute().is_ok());

        let content = fs::read_to_string(&output_path).unwrap();
        let rules = RuleSet::compile(&content).unwrap();
        assert_eq!(rules.len(), RuleSet::builtin().len());
    }

    #[test]
    fn test_existing_file_needs_force() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("segrule.rules");
        fs::write(&output_path, "keep me").unwrap();

        let args = GenerateRulesArgs {
            output: output_path.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "keep me");

        let args = GenerateRulesArgs {
            output: output_path.clone(),
            force: true,
        };
        assert!(args.execute().is_ok());
        assert_ne!(fs::read_to_string(&output_path).unwrap(), "keep me");
    }
}
