//! Output assembly
//!
//! Rewrites every surviving candidate with its template and copies the text
//! between candidates verbatim.

use crate::resolver::CandidateMatch;

/// Default break marker
pub const DEFAULT_BREAK_MARKER: &str = "\n";

/// Builds segmented text from resolved boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembler {
    marker: String,
}

impl Assembler {
    /// Create an assembler emitting `marker` for every template break
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The break marker
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Apply `boundaries` (ascending, non-overlapping) to `text`.
    ///
    /// A boundary starting inside an already rewritten span is skipped. The
    /// trailing fragment after the last boundary is copied without adding a
    /// marker.
    pub fn assemble(&self, text: &str, boundaries: &[CandidateMatch<'_>]) -> String {
        let mut out = String::with_capacity(text.len() + boundaries.len() * self.marker.len());
        let mut cursor = 0;

        for boundary in boundaries {
            if boundary.span.start < cursor {
                continue;
            }
            out.push_str(&text[cursor..boundary.span.start]);
            boundary
                .template()
                .expand_into(text, &boundary.groups, &self.marker, &mut out);
            cursor = boundary.span.end;
        }

        out.push_str(&text[cursor..]);
        out
    }

    /// Split segmented text into sentences on this assembler's marker
    pub fn sentences<'t>(&self, segmented: &'t str) -> Vec<&'t str> {
        sentences(segmented, &self.marker)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_MARKER)
    }
}

/// Apply `boundaries` to `text` using the default `"\n"` break marker
pub fn assemble(text: &str, boundaries: &[CandidateMatch<'_>]) -> String {
    Assembler::default().assemble(text, boundaries)
}

/// Split segmented text into sentences.
///
/// A marker at the very end closes the last sentence and does not start an
/// empty one. Empty sentences elsewhere are kept.
pub fn sentences<'t>(segmented: &'t str, marker: &str) -> Vec<&'t str> {
    if segmented.is_empty() {
        return Vec::new();
    }
    if marker.is_empty() {
        return vec![segmented];
    }
    segmented
        .strip_suffix(marker)
        .unwrap_or(segmented)
        .split(marker)
        .collect()
}
