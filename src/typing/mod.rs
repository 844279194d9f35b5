//! Resolution of free-text force-field type descriptions into PDB nomenclature.
//!
//! A parameter file describes each atom type with text such as `"Glycine N"` or
//! `"C-Terminal AIB OXT"`. The description is split into words and run through an ordered
//! [`RuleSet`]; the first rule whose word count and prefixes match produces the residue
//! name, the atom name, and the hetero flag.

mod atom_name;
mod error;
mod rule;

pub use atom_name::standard_atom_name;
pub use error::RuleError;
pub use rule::{Resolution, ResidueSource, RuleSet, TypeRule};

/// Descriptions are cut to this many words before matching.
pub const MAX_WORDS: usize = 8;

/// Splits a description on whitespace, keeping at most [`MAX_WORDS`] words.
pub fn tokenize(description: &str) -> Vec<&str> {
    description.split_whitespace().take(MAX_WORDS).collect()
}

/// Tokenizes and resolves a description in one step.
pub fn resolve_description(rules: &RuleSet, description: &str) -> Option<Resolution> {
    rules.resolve(&tokenize(description))
}
