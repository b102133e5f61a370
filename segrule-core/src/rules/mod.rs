//! Segmentation rules and the rule-definition language
//!
//! A rule source is a small markup with two element kinds:
//!
//! ```text
//! # terminal punctuation followed by whitespace
//! <do>
//!   <in>([.!?]+)\s+</in>
//!   <out>\1\n</out>
//! </do>
//! <dont>\bDr\.</dont>
//! ```
//!
//! `<do>` elements compile into [`CandidateRule`]s that propose sentence ends,
//! `<dont>` elements compile into [`VetoRule`]s that suppress any proposal
//! they overlap.

mod builtin;
mod compiler;
mod parser;
mod template;

pub use template::Template;

use crate::error::RuleError;
use fancy_regex::Regex;
use std::fmt;

/// Position of a rule in its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId {
    /// 1-based ordinal among all elements of the source
    pub ordinal: usize,
    /// Line where the element opens
    pub line: usize,
}

impl RuleId {
    /// Create a rule id
    pub fn new(ordinal: usize, line: usize) -> Self {
        Self { ordinal, line }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule #{} (line {})", self.ordinal, self.line)
    }
}

/// A `<do>` rule: a pattern proposing sentence ends and its rewrite template
#[derive(Debug, Clone)]
pub struct CandidateRule {
    pub(crate) id: RuleId,
    pub(crate) pattern: Regex,
    pub(crate) template: Template,
}

impl CandidateRule {
    /// Position of the rule in its source
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The output template
    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// A `<dont>` rule: a pattern whose matches suppress overlapping candidates
#[derive(Debug, Clone)]
pub struct VetoRule {
    pub(crate) id: RuleId,
    pub(crate) pattern: Regex,
}

impl VetoRule {
    /// Position of the rule in its source
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// A compiled rule
#[derive(Debug, Clone)]
pub enum Rule {
    /// Proposes a boundary (`<do>`)
    Candidate(CandidateRule),
    /// Suppresses boundaries (`<dont>`)
    Veto(VetoRule),
}

impl Rule {
    /// Position of the rule in its source
    pub fn id(&self) -> RuleId {
        match self {
            Rule::Candidate(rule) => rule.id,
            Rule::Veto(rule) => rule.id,
        }
    }
}

/// The compiled, immutable set of candidate and veto rules
///
/// Both sequences keep declaration order. A `RuleSet` is never edited in
/// place; compile a new one when the source changes.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    candidates: Vec<CandidateRule>,
    vetoes: Vec<VetoRule>,
}

impl RuleSet {
    /// Compile a rule source.
    ///
    /// Fails on the first structural, pattern or template error; no partial
    /// rule set is ever returned.
    pub fn compile(source: &str) -> Result<Self, RuleError> {
        let rules = compiler::compile(source)?;
        Ok(Self::from_rules(rules))
    }

    /// The bundled English rule set
    pub fn builtin() -> &'static RuleSet {
        builtin::rules()
    }

    /// Source text of the bundled rule set
    pub fn builtin_source() -> &'static str {
        builtin::SOURCE
    }

    /// Partition compiled rules into candidates and vetoes, keeping order
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut set = Self::default();
        for rule in rules {
            match rule {
                Rule::Candidate(rule) => set.candidates.push(rule),
                Rule::Veto(rule) => set.vetoes.push(rule),
            }
        }
        set
    }

    /// Candidate rules in declaration order
    pub fn candidates(&self) -> &[CandidateRule] {
        &self.candidates
    }

    /// Veto rules in declaration order
    pub fn vetoes(&self) -> &[VetoRule] {
        &self.vetoes
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.candidates.len() + self.vetoes.len()
    }

    /// Whether the set holds no rules at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_partitions_in_declaration_order() {
        let source = r"
<dont>a</dont>
<do><in>(x)</in><out>\1\n</out></do>
<dont>b</dont>
<do><in>(y)</in><out>\1\n</out></do>
";
        let rules = RuleSet::compile(source).unwrap();
        assert_eq!(rules.len(), 4);

        let candidate_ids: Vec<usize> = rules.candidates().iter().map(|r| r.id().ordinal).collect();
        let veto_ids: Vec<usize> = rules.vetoes().iter().map(|r| r.id().ordinal).collect();
        assert_eq!(candidate_ids, vec![2, 4]);
        assert_eq!(veto_ids, vec![1, 3]);
        assert_eq!(rules.vetoes()[1].pattern().as_str(), "b");
    }

    #[test]
    fn test_empty_source_gives_empty_set() {
        let rules = RuleSet::compile("# only a comment\n\n").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_rule_id_display() {
        assert_eq!(RuleId::new(3, 12).to_string(), "rule #3 (line 12)");
    }

    #[test]
    fn test_rule_set_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
