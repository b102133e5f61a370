//! Boundary resolution
//!
//! Resolution runs in two phases. First every candidate rule and every veto
//! rule is matched over the whole text. Then each candidate is checked
//! against all veto spans: any overlap drops it. Survivors that overlap an
//! earlier survivor are dropped too, so a run like `?!` never yields two
//! breaks.
//!
//! Spans cover only the text a match consumes. Lookahead and lookbehind
//! context decides whether a pattern matches but never counts toward overlap.

use crate::rules::{CandidateRule, RuleId, RuleSet, Template, VetoRule};
use crate::span::Span;

/// A match of a candidate rule
#[derive(Debug, Clone)]
pub struct CandidateMatch<'r> {
    /// The rule that produced the match
    pub rule: &'r CandidateRule,
    /// Span of the whole match
    pub span: Span,
    /// Spans of the capture groups; index 0 is the whole match
    pub groups: Vec<Option<Span>>,
}

impl<'r> CandidateMatch<'r> {
    /// Template to apply if the candidate survives
    pub fn template(&self) -> &'r Template {
        &self.rule.template
    }
}

/// A match of a veto rule
#[derive(Debug, Clone, Copy)]
pub struct VetoMatch<'r> {
    /// The rule that produced the match
    pub rule: &'r VetoRule,
    /// Span of the match
    pub span: Span,
}

/// A candidate dropped because a veto overlapped it
#[derive(Debug, Clone)]
pub struct Suppression<'r> {
    /// The dropped candidate
    pub candidate: CandidateMatch<'r>,
    /// The first overlapping veto, in declaration order
    pub veto: VetoMatch<'r>,
}

/// Outcome of resolving a text against a rule set
#[derive(Debug, Clone, Default)]
pub struct Resolution<'r> {
    /// Surviving candidates in ascending start order
    pub boundaries: Vec<CandidateMatch<'r>>,
    /// Candidates dropped by a veto
    pub suppressed: Vec<Suppression<'r>>,
    /// Candidates that survived every veto but overlapped an earlier survivor
    pub superseded: Vec<CandidateMatch<'r>>,
}

/// Resolve the sentence boundaries of `text`
pub fn resolve<'r>(text: &str, rules: &'r RuleSet) -> Resolution<'r> {
    let candidates = collect_candidates(text, rules);
    let vetoes = collect_vetoes(text, rules);

    let mut resolution = Resolution::default();
    for candidate in candidates {
        if let Some(veto) = vetoes.iter().find(|v| v.span.overlaps(&candidate.span)) {
            tracing::trace!(
                candidate = %candidate.rule.id,
                span = %candidate.span,
                veto = %veto.rule.id,
                veto_span = %veto.span,
                "candidate vetoed"
            );
            resolution.suppressed.push(Suppression {
                candidate,
                veto: *veto,
            });
            continue;
        }

        let supersedes = resolution
            .boundaries
            .last()
            .is_some_and(|last| last.span.overlaps(&candidate.span));
        if supersedes {
            resolution.superseded.push(candidate);
        } else {
            resolution.boundaries.push(candidate);
        }
    }

    tracing::debug!(
        boundaries = resolution.boundaries.len(),
        suppressed = resolution.suppressed.len(),
        superseded = resolution.superseded.len(),
        "resolved boundaries"
    );

    resolution
}

/// All candidate matches, ordered by start offset then rule declaration order
fn collect_candidates<'r>(text: &str, rules: &'r RuleSet) -> Vec<CandidateMatch<'r>> {
    let mut candidates: Vec<CandidateMatch<'r>> = rules
        .candidates()
        .iter()
        .flat_map(|rule| {
            until_error(rule.id, rule.pattern.captures_iter(text)).map(move |caps| {
                CandidateMatch {
                    rule,
                    span: caps.get(0).map(Span::from).unwrap_or_default(),
                    groups: caps.iter().map(|m| m.map(Span::from)).collect(),
                }
            })
        })
        .collect();

    // Stable: equal starts keep rule declaration order
    candidates.sort_by_key(|c| c.span.start);
    candidates
}

/// All veto matches, in rule declaration order
fn collect_vetoes<'r>(text: &str, rules: &'r RuleSet) -> Vec<VetoMatch<'r>> {
    rules
        .vetoes()
        .iter()
        .flat_map(|rule| {
            until_error(rule.id, rule.pattern.find_iter(text)).map(move |m| VetoMatch {
                rule,
                span: Span::from(m),
            })
        })
        .collect()
}

/// Matches of one rule up to the first matching error.
///
/// The only runtime error is an exhausted backtrack limit; the rule then
/// contributes the matches found so far.
fn until_error<T>(
    rule: RuleId,
    matches: impl Iterator<Item = Result<T, fancy_regex::Error>>,
) -> impl Iterator<Item = T> {
    matches.map_while(move |m| {
        m.map_err(|e| tracing::warn!(rule = %rule, error = %e, "pattern matching aborted"))
            .ok()
    })
}
