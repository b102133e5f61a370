//! The bundled default rule set

use super::RuleSet;
use std::sync::OnceLock;

pub(crate) const SOURCE: &str = include_str!("../../../configs/rules/default.rules");

static BUILTIN: OnceLock<RuleSet> = OnceLock::new();

pub(crate) fn rules() -> &'static RuleSet {
    BUILTIN.get_or_init(|| RuleSet::compile(SOURCE).expect("Failed to compile bundled rule set"))
}
