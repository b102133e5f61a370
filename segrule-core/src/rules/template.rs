//! Output templates of candidate rules

use super::RuleId;
use crate::error::RuleError;
use crate::span::Span;
use fancy_regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
    Break,
}

/// Rewrite template applied to a surviving candidate match.
///
/// Syntax:
/// - `\1` .. `\99`: numbered group (`\0` is the whole match)
/// - `\g<N>`, `\g<name>`: numbered or named group
/// - `\n`: the break marker
/// - `\t`: a tab, `\\`: a backslash
/// - any other escaped character stands for itself
///
/// Group references are checked against the paired pattern when the template
/// is compiled. A template without a break gets one appended, so each
/// candidate yields exactly one break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    pub(crate) fn compile(source: &str, pattern: &Regex, rule: RuleId) -> Result<Self, RuleError> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let Some(ch) = rest.chars().next() else {
                break;
            };
            if ch != '\\' {
                literal.push(ch);
                pos += ch.len_utf8();
                continue;
            }

            let escaped = &rest[1..];
            let Some(next) = escaped.chars().next() else {
                literal.push('\\');
                break;
            };
            pos += 1 + next.len_utf8();

            match next {
                'n' => {
                    flush(&mut literal, &mut pieces);
                    pieces.push(Piece::Break);
                }
                't' => literal.push('\t'),
                'g' if escaped[1..].starts_with('<') => match escaped[2..].find('>') {
                    Some(len) => {
                        let reference = &escaped[2..2 + len];
                        pos += len + 2;
                        let index =
                            resolve(reference, &format!("\\g<{reference}>"), pattern, rule)?;
                        flush(&mut literal, &mut pieces);
                        pieces.push(Piece::Group(index));
                    }
                    None => literal.push_str("\\g"),
                },
                digit if digit.is_ascii_digit() => {
                    let mut reference = digit.to_string();
                    if let Some(second) = escaped[1..].chars().next().filter(char::is_ascii_digit) {
                        reference.push(second);
                        pos += 1;
                    }
                    let index = resolve(&reference, &format!("\\{reference}"), pattern, rule)?;
                    flush(&mut literal, &mut pieces);
                    pieces.push(Piece::Group(index));
                }
                other => literal.push(other),
            }
        }
        flush(&mut literal, &mut pieces);

        if !pieces.contains(&Piece::Break) {
            pieces.push(Piece::Break);
        }

        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    /// The template as written in the rule source
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expand the template for one match, appending to `out`.
    ///
    /// `groups[i]` is the span of group `i` in `text`; groups that did not
    /// participate in the match expand to nothing.
    pub fn expand_into(&self, text: &str, groups: &[Option<Span>], marker: &str, out: &mut String) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(literal) => out.push_str(literal),
                Piece::Group(index) => {
                    if let Some(span) = groups.get(*index).copied().flatten() {
                        out.push_str(&text[span.range()]);
                    }
                }
                Piece::Break => out.push_str(marker),
            }
        }
    }

    /// Expand the template for one match into a new string
    pub fn expand(&self, text: &str, groups: &[Option<Span>], marker: &str) -> String {
        let mut out = String::new();
        self.expand_into(text, groups, marker, &mut out);
        out
    }
}

fn flush(literal: &mut String, pieces: &mut Vec<Piece>) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

fn resolve(reference: &str, written: &str, pattern: &Regex, rule: RuleId) -> Result<usize, RuleError> {
    let available = pattern.captures_len() - 1;
    let index = match reference.parse::<usize>() {
        Ok(index) => (index <= available).then_some(index),
        Err(_) => pattern
            .capture_names()
            .position(|name| name == Some(reference)),
    };

    index.ok_or_else(|| RuleError::TemplateReference {
        rule,
        reference: written.to_string(),
        available,
    })
}
