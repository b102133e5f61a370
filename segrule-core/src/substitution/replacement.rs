//! Replacement strings of substitution rules

use fancy_regex::{Captures, Expander};

/// Replacement text of a substitution rule.
///
/// Group references use `$1` or `${name}`; `$$` is a literal dollar, and so is
/// any other `$` not followed by a digit or `{`. A numbered reference ends at
/// the last digit, so `$1st` is group 1 followed by `st`.
///
/// Case directives are applied to the expanded replacement:
/// `uc(..)` uppercases and `lc(..)` lowercases up to the first `)`,
/// `\u` uppercases and `\l` lowercases the following character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    source: String,
    expansion: String,
    has_case_directives: bool,
}

impl Replacement {
    /// Parse a replacement string
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            expansion: normalize_group_refs(source),
            has_case_directives: ["uc(", "lc(", "\\u", "\\l"]
                .iter()
                .any(|directive| source.contains(directive)),
        }
    }

    /// The replacement as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether this replacement deletes what it matches
    pub fn is_deletion(&self) -> bool {
        self.source.is_empty()
    }

    pub(crate) fn expand(&self, caps: &Captures<'_>) -> String {
        let expanded = Expander::default().expansion(&self.expansion, caps);
        if self.has_case_directives {
            apply_case_directives(&expanded)
        } else {
            expanded
        }
    }
}

/// Rewrite `$N` as `${N}` so digits never run into the following text, and
/// escape every `$` that does not start a group reference
fn normalize_group_refs(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push_str("$$");
            }
            Some(d) if d.is_ascii_digit() => {
                out.push_str("${");
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    out.push(d);
                }
                out.push('}');
            }
            Some('{') => out.push('$'),
            _ => out.push_str("$$"),
        }
    }

    out
}

fn apply_case_directives(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix("uc(").or_else(|| rest.strip_prefix("lc(")) {
            if let Some(close) = inner.find(')') {
                let body = &inner[..close];
                if rest.starts_with('u') {
                    out.push_str(&body.to_uppercase());
                } else {
                    out.push_str(&body.to_lowercase());
                }
                rest = &inner[close + 1..];
                continue;
            }
        }

        if let Some(after) = rest.strip_prefix("\\u").or_else(|| rest.strip_prefix("\\l")) {
            if let Some(next) = after.chars().next() {
                if rest.as_bytes()[1] == b'u' {
                    out.extend(next.to_uppercase());
                } else {
                    out.extend(next.to_lowercase());
                }
                rest = &after[next.len_utf8()..];
                continue;
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
