//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod common;
pub mod explain;
pub mod generate_rules;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text into one sentence per line
    Split(split::SplitArgs),

    /// Check a rule file and substitution tables
    Validate(validate::ValidateArgs),

    /// Show substitutions, boundaries and vetoes for a text
    Explain(explain::ExplainArgs),

    /// Write the bundled rules to a file as a starting point
    GenerateRules(generate_rules::GenerateRulesArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::Explain(args) => args.execute(),
            Commands::GenerateRules(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        TestCli::try_parse_from(std::iter::once("segrule").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_split_command_parsing() {
        match parse(&[
            "split", "-f", "json", "-r", "my.rules", "-t", "a.subst", "-t", "b.subst", "-s",
            "in.txt",
        ]) {
            Commands::Split(args) => {
                assert_eq!(args.input, vec!["in.txt"]);
                assert_eq!(args.format, Some(crate::output::OutputFormat::Json));
                assert_eq!(args.rule_args.rules.as_deref(), Some(std::path::Path::new("my.rules")));
                assert_eq!(args.rule_args.subst.len(), 2);
                assert!(args.strip_empty_lines);
            }
            other => panic!("expected Split, got {other:?}"),
        }
    }

    #[test]
    fn test_split_defaults_to_stdin() {
        match parse(&["split"]) {
            Commands::Split(args) => {
                assert!(args.input.is_empty());
                assert!(args.format.is_none());
            }
            other => panic!("expected Split, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_rules() {
        let result = TestCli::try_parse_from(["segrule", "validate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_explain_text_conflicts_with_input() {
        let result = TestCli::try_parse_from(["segrule", "explain", "Hi.", "-i", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_rules_parsing() {
        match parse(&["generate-rules", "-o", "out.rules", "--force"]) {
            Commands::GenerateRules(args) => {
                assert_eq!(args.output, std::path::PathBuf::from("out.rules"));
                assert!(args.force);
            }
            other => panic!("expected GenerateRules, got {other:?}"),
        }
    }
}
