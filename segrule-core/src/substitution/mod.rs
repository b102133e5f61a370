//! Substitution pipeline
//!
//! Normalizes text before segmentation by running substitution tables in
//! the order the caller gives them. Inside a table every rule rewrites the
//! output of the previous rule, and every table rewrites the output of the
//! previous table.
//!
//! The pipeline never changes line structure: a rule application that would
//! add or remove line breaks is skipped and logged.

mod replacement;
mod table;

pub use replacement::Replacement;
pub use table::{SubstitutionRule, SubstitutionTable};

/// One rule application that changed the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionStep {
    /// Name of the table the rule belongs to
    pub table: String,
    /// 1-based position of the rule in its table
    pub ordinal: usize,
    /// The rule's pattern
    pub pattern: String,
    /// The rule's replacement
    pub replacement: String,
    /// Text after the rule was applied
    pub result: String,
}

/// Record of every effective rule application for one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTrace {
    /// The text before any substitution
    pub input: String,
    /// Applications that changed the text, in order
    pub steps: Vec<SubstitutionStep>,
}

impl SubstitutionTrace {
    /// The text after all substitutions
    pub fn output(&self) -> &str {
        self.steps
            .last()
            .map(|step| step.result.as_str())
            .unwrap_or(&self.input)
    }

    /// Whether no rule changed the text
    pub fn is_unchanged(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Apply `tables` to `text` in order
pub fn apply(text: &str, tables: &[SubstitutionTable]) -> String {
    let mut current = text.to_string();
    for table in tables {
        for (index, rule) in table.rules().iter().enumerate() {
            if let Some(next) = apply_rule(&current, table, index, rule) {
                current = next;
            }
        }
    }
    current
}

/// Apply `tables` to `text`, recording every rule that changed it
pub fn apply_traced(text: &str, tables: &[SubstitutionTable]) -> SubstitutionTrace {
    let mut trace = SubstitutionTrace {
        input: text.to_string(),
        steps: Vec::new(),
    };

    for table in tables {
        for (index, rule) in table.rules().iter().enumerate() {
            if let Some(next) = apply_rule(trace.output(), table, index, rule) {
                trace.steps.push(SubstitutionStep {
                    table: table.name().to_string(),
                    ordinal: index + 1,
                    pattern: rule.pattern().as_str().to_string(),
                    replacement: rule.replacement().as_str().to_string(),
                    result: next,
                });
            }
        }
    }

    trace
}

/// Returns the rewritten text, or `None` when the rule changed nothing or
/// would have changed the number of line breaks.
fn apply_rule(
    text: &str,
    table: &SubstitutionTable,
    index: usize,
    rule: &SubstitutionRule,
) -> Option<String> {
    let mut rewritten = String::with_capacity(text.len());
    let mut copied = 0;
    for caps in rule.pattern.captures_iter(text) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(e) => {
                tracing::warn!(
                    table = table.name(),
                    rule = index + 1,
                    error = %e,
                    "substitution pattern failed; skipped"
                );
                return None;
            }
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        rewritten.push_str(&text[copied..whole.start()]);
        rewritten.push_str(&rule.replacement.expand(&caps));
        copied = whole.end();
    }
    rewritten.push_str(&text[copied..]);

    if rewritten == text {
        return None;
    }

    if line_breaks(&rewritten) != line_breaks(text) {
        tracing::warn!(
            table = table.name(),
            rule = index + 1,
            pattern = rule.pattern().as_str(),
            "substitution would change line breaks; skipped"
        );
        return None;
    }

    Some(rewritten)
}

fn line_breaks(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, pairs: &[(&str, &str)]) -> SubstitutionTable {
        SubstitutionTable::new(name, pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_no_tables_is_identity() {
        assert_eq!(apply("“Quoted.” text", &[]), "“Quoted.” text");
    }

    #[test]
    fn test_rules_chain_within_a_table() {
        let t = table("chain", &[("a", "b"), ("b", "c")]);
        assert_eq!(apply("aab", &[t]), "ccc");
    }

    #[test]
    fn test_tables_chain_in_caller_order() {
        let a = table("A", &[("“\\.", ".")]);
        let b = table("B", &[("[“”]", "\"")]);

        let text = "He said “.” Then left.";
        let ab = apply(text, &[a.clone(), b.clone()]);
        let ba = apply(text, &[b, a]);

        assert_eq!(ab, "He said .\" Then left.");
        assert_eq!(ba, "He said \".\" Then left.");
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_line_breaks_are_preserved() {
        let t = table("joiner", &[("-\\n", ""), ("x", "y")]);
        assert_eq!(apply("a-\nx", &[t]), "a-\ny");
    }

    #[test]
    fn test_lookaround_patterns() {
        let t = table(
            "spacing",
            &[(r"(?<=\d)(?=(?:\d{3})+\b)", ","), (r"\s+(?=[.!?])", "")],
        );
        assert_eq!(apply("Paid 1250000 today .", &[t]), "Paid 1,250,000 today.");
    }

    #[test]
    fn test_trace_records_effective_steps() {
        let t = table("t", &[("colour", "color"), ("zzz", "never"), ("color", "hue")]);
        let trace = apply_traced("colour", &[t]);

        assert_eq!(trace.input, "colour");
        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[0].ordinal, 1);
        assert_eq!(trace.steps[0].result, "color");
        assert_eq!(trace.steps[1].ordinal, 3);
        assert_eq!(trace.output(), "hue");
    }

    #[test]
    fn test_trace_output_matches_apply() {
        let tables = [
            table("one", &[("(\\w+)@(\\w+)", "$1 at $2")]),
            table("two", &[("\\bat\\b", "uc(at)")]),
        ];
        let text = "mail me@home now";
        let trace = apply_traced(text, &tables);
        assert_eq!(trace.output(), apply(text, &tables));
        assert_eq!(trace.output(), "mail me AT home now");
        assert!(!trace.is_unchanged());
    }
}
