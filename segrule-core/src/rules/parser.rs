//! Markup parser for rule sources
//!
//! Produces raw element bodies with their positions; patterns and templates
//! are compiled afterwards by the compiler.

use super::RuleId;
use crate::error::RuleError;

const TAGS: [&str; 4] = ["<do>", "<dont>", "<in>", "<out>"];

/// One element of a rule source, bodies trimmed but not yet compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Element {
    Do { input: String, output: String },
    Dont { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedRule {
    pub id: RuleId,
    pub element: Element,
}

/// Parse a rule source into its elements, in declaration order
pub(crate) fn parse(source: &str) -> Result<Vec<ParsedRule>, RuleError> {
    let cleaned = strip_comments(source);
    let mut cursor = Cursor::new(&cleaned);
    let mut rules = Vec::new();

    loop {
        cursor.skip_whitespace();
        if cursor.at_end() {
            break;
        }

        let line = cursor.line();
        let id = RuleId::new(rules.len() + 1, line);

        let element = if cursor.eat("<do>") {
            parse_do(&mut cursor, line)?
        } else if cursor.eat("<dont>") {
            Element::Dont {
                pattern: cursor.body("dont", line)?,
            }
        } else if cursor.rest().starts_with("</") {
            return Err(malformed(
                line,
                format!("unexpected closing tag {}", cursor.next_token()),
            ));
        } else if cursor.rest().starts_with('<') {
            return Err(malformed(
                line,
                format!("unknown element {}", cursor.next_token()),
            ));
        } else {
            return Err(malformed(
                line,
                format!(
                    "unexpected text outside of a rule element: '{}'",
                    cursor.next_token()
                ),
            ));
        };

        rules.push(ParsedRule { id, element });
    }

    Ok(rules)
}

fn parse_do(cursor: &mut Cursor<'_>, opened_at: usize) -> Result<Element, RuleError> {
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;

    loop {
        cursor.skip_whitespace();
        if cursor.at_end() {
            return Err(malformed(opened_at, "<do> is never closed".to_string()));
        }

        let line = cursor.line();
        if cursor.eat("</do>") {
            break;
        } else if cursor.eat("<in>") {
            let body = cursor.body("in", line)?;
            if input.replace(body).is_some() {
                return Err(malformed(line, "<do> has more than one <in>".to_string()));
            }
        } else if cursor.eat("<out>") {
            let body = cursor.body("out", line)?;
            if output.replace(body).is_some() {
                return Err(malformed(line, "<do> has more than one <out>".to_string()));
            }
        } else {
            return Err(malformed(
                line,
                format!(
                    "expected <in>, <out> or </do> inside <do>, found '{}'",
                    cursor.next_token()
                ),
            ));
        }
    }

    match (input, output) {
        (Some(input), Some(output)) => Ok(Element::Do { input, output }),
        (None, _) => Err(malformed(opened_at, "<do> is missing <in>".to_string())),
        (_, None) => Err(malformed(opened_at, "<do> is missing <out>".to_string())),
    }
}

fn malformed(line: usize, reason: String) -> RuleError {
    RuleError::Malformed { line, reason }
}

/// First markup tag inside a body. Group names such as `(?P<in>..)`,
/// `(?<out>..)` and `\g<in>` are not tags.
fn stray_tag(raw: &str) -> Option<&'static str> {
    TAGS.iter().copied().find(|tag| {
        raw.match_indices(tag).any(|(at, _)| {
            let before = &raw[..at];
            !["(?P", "(?", "\\g"]
                .iter()
                .any(|prefix| before.ends_with(prefix))
        })
    })
}

/// Blank out comment lines, keeping line numbering intact
fn strip_comments(source: &str) -> String {
    let mut cleaned = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            if line.ends_with('\n') {
                cleaned.push('\n');
            }
        } else {
            cleaned.push_str(line);
        }
    }
    cleaned
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// 1-based line of the current position
    fn line(&self) -> usize {
        self.src[..self.pos].bytes().filter(|&b| b == b'\n').count() + 1
    }

    /// Consume a body up to and including `</element>`
    fn body(&mut self, element: &str, opened_at: usize) -> Result<String, RuleError> {
        let close = format!("</{element}>");
        let rest = self.rest();
        let Some(end) = rest.find(&close) else {
            return Err(malformed(opened_at, format!("<{element}> is never closed")));
        };

        let raw = &rest[..end];
        if let Some(tag) = stray_tag(raw) {
            return Err(malformed(
                opened_at,
                format!("<{element}> is not closed before {tag}"),
            ));
        }

        let body = raw.trim();
        if body.is_empty() {
            return Err(malformed(opened_at, format!("<{element}> has an empty body")));
        }

        self.pos += end + close.len();
        Ok(body.to_string())
    }

    /// Short description of what comes next, for error messages
    fn next_token(&self) -> String {
        let rest = self.rest();
        if rest.starts_with('<') {
            if let Some(end) = rest.find('>') {
                return rest[..=end].to_string();
            }
        }
        rest.split_whitespace()
            .next()
            .unwrap_or_default()
            .chars()
            .take(24)
            .collect()
    }
}
