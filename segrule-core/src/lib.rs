//! Rule-driven sentence segmentation
//!
//! Text is segmented in three stages:
//!
//! 1. **Substitution**: ordered tables of regex rewrites normalize the text
//!    (quotes, soft hyphens, spacing) without touching its line structure.
//! 2. **Resolution**: candidate rules (`<do>`) propose sentence ends, veto
//!    rules (`<dont>`) suppress any proposal they overlap.
//! 3. **Assembly**: every surviving proposal is rewritten with its output
//!    template, which places the break marker.
//!
//! Rules are written in a small markup and compiled into a [`RuleSet`];
//! a bundled English rule set is available as [`RuleSet::builtin`].
//!
//! # Example
//!
//! ```rust
//! use segrule_core::{segment, RuleSet, SubstitutionTable};
//!
//! let rules = RuleSet::compile(r"
//!     <do><in>([.!?]+)\s+</in><out>\1\n</out></do>
//!     <dont>\bDr\.</dont>
//! ").unwrap();
//! let quotes = SubstitutionTable::new("quotes", [("[“”]", "\"")]).unwrap();
//!
//! let segmented = segment("Dr. Who said “hi.” Then he left.", &rules, &[quotes]);
//! assert_eq!(segmented, "Dr. Who said \"hi.\" Then he left.");
//!
//! let segmented = segment("He left. She stayed.", RuleSet::builtin(), &[]);
//! assert_eq!(segmented, "He left.\nShe stayed.\n");
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod input;
pub mod resolver;
pub mod rules;
pub mod segmenter;
pub mod span;
pub mod substitution;

pub use assembler::{sentences, Assembler, DEFAULT_BREAK_MARKER};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result, RuleError, SubstitutionError};
pub use input::Input;
pub use resolver::{resolve, CandidateMatch, Resolution, Suppression, VetoMatch};
pub use rules::{CandidateRule, Rule, RuleId, RuleSet, Template, VetoRule};
pub use segmenter::{Explanation, Segmenter};
pub use span::Span;
pub use substitution::{SubstitutionStep, SubstitutionTable, SubstitutionTrace};

/// Segment `text`: apply `tables` in order, resolve boundaries with `rules`
/// and insert `"\n"` at every sentence end.
///
/// Text after the last boundary is kept without an added break.
pub fn segment(text: &str, rules: &RuleSet, tables: &[SubstitutionTable]) -> String {
    let text = substitution::apply(text, tables);
    let resolution = resolver::resolve(&text, rules);
    assembler::assemble(&text, &resolution.boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_with_builtin_rules() {
        let rules = RuleSet::builtin();
        assert_eq!(segment("Dr. Smith arrived.", rules, &[]), "Dr. Smith arrived.\n");
        assert_eq!(
            segment("He left. She stayed.", rules, &[]),
            "He left.\nShe stayed.\n"
        );
    }

    #[test]
    fn test_segment_empty_text() {
        assert_eq!(segment("", RuleSet::builtin(), &[]), "");
    }

    #[test]
    fn test_segment_matches_segmenter() {
        let text = "It costs 3.50 dollars. Visit www.example.com today! Ok?";
        assert_eq!(
            segment(text, RuleSet::builtin(), &[]),
            Segmenter::default().segment(text)
        );
    }
}
