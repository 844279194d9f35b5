use super::schema::{RuleEntry, RuleFile};
use crate::model::types::Name4;
use crate::typing::{ResidueSource, RuleError, RuleSet, TypeRule};
use std::fs;
use std::path::Path;

const EMBEDDED_RULES: &str = include_str!("../../rules/amber99.toml");

pub fn load_embedded_rules() -> RuleSet {
    parse_rules(EMBEDDED_RULES)
        .unwrap_or_else(|e| panic!("Failed to load embedded naming rules: {}", e))
}

/// Parses a TOML rule table, keeping the order of its `[[rule]]` entries.
pub fn parse_rules(content: &str) -> Result<RuleSet, RuleError> {
    let file: RuleFile = toml::from_str(content)?;
    log::debug!(
        "loading naming rules '{}' ({} entries){}",
        file.info.name,
        file.rules.len(),
        file.info
            .description
            .as_deref()
            .map(|d| format!(": {d}"))
            .unwrap_or_default()
    );

    let rules = file
        .rules
        .into_iter()
        .enumerate()
        .map(|(index, entry)| to_rule(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    RuleSet::new(rules)
}

pub fn load_rules(path: &Path) -> Result<RuleSet, RuleError> {
    let content = fs::read_to_string(path).map_err(|source| RuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&content)
}

fn to_rule(index: usize, entry: RuleEntry) -> Result<TypeRule, RuleError> {
    let residue = match (entry.residue, entry.residue_word) {
        (Some(name), None) => ResidueSource::Literal(Name4::new(&name)),
        (None, Some(word)) => ResidueSource::Word(word),
        (Some(_), Some(_)) => {
            return Err(RuleError::invalid(
                index,
                entry.primary,
                "`residue` and `residue_word` are mutually exclusive",
            ));
        }
        (None, None) => {
            return Err(RuleError::invalid(
                index,
                entry.primary,
                "one of `residue` or `residue_word` is required",
            ));
        }
    };

    Ok(TypeRule {
        primary: entry.primary.into(),
        secondary: entry.secondary.map(Into::into),
        word_count: entry.words,
        residue,
        atom_word: entry.atom_word,
        is_het: entry.het,
    })
}
