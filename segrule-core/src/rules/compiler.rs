//! Compilation of parsed elements into rules

use super::parser::{self, Element, ParsedRule};
use super::{CandidateRule, Rule, RuleId, Template, VetoRule};
use crate::error::RuleError;
use fancy_regex::{Regex, RegexBuilder};

/// Upper bound for the compiled size of a pattern
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Backtracking steps allowed per match attempt for lookaround patterns
const BACKTRACK_LIMIT: usize = 1_000_000;

/// Compile a rule source into rules, in declaration order
pub(crate) fn compile(source: &str) -> Result<Vec<Rule>, RuleError> {
    let parsed = parser::parse(source)?;
    let rules = parsed
        .into_iter()
        .map(compile_rule)
        .collect::<Result<Vec<_>, _>>()?;

    let candidates = rules
        .iter()
        .filter(|r| matches!(r, Rule::Candidate(_)))
        .count();
    tracing::debug!(
        candidates,
        vetoes = rules.len() - candidates,
        "compiled segmentation rules"
    );

    Ok(rules)
}

fn compile_rule(parsed: ParsedRule) -> Result<Rule, RuleError> {
    let ParsedRule { id, element } = parsed;
    match element {
        Element::Do { input, output } => {
            let pattern = compile_pattern(&input, id)?;
            let template = Template::compile(&output, &pattern, id)?;
            Ok(Rule::Candidate(CandidateRule {
                id,
                pattern,
                template,
            }))
        }
        Element::Dont { pattern } => Ok(Rule::Veto(VetoRule {
            id,
            pattern: compile_pattern(&pattern, id)?,
        })),
    }
}

fn compile_pattern(pattern: &str, rule: RuleId) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .delegate_size_limit(PATTERN_SIZE_LIMIT)
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
        .map_err(|e| RuleError::PatternSyntax {
            rule,
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
