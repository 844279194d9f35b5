use super::loader;
use crate::typing::RuleSet;
use std::sync::OnceLock;

static RULES: OnceLock<RuleSet> = OnceLock::new();

pub fn get_rules() -> &'static RuleSet {
    RULES.get_or_init(loader::load_embedded_rules)
}
