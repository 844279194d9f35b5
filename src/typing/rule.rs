use super::atom_name::standard_atom_name;
use super::error::RuleError;
use super::MAX_WORDS;
use crate::model::types::Name4;
use smol_str::SmolStr;

/// Where a matching rule takes its residue name from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidueSource {
    /// A fixed residue name such as `"GLY "`.
    Literal(Name4),
    /// The description word at this index (e.g. `GLY` in `N-Terminal GLY N`).
    Word(usize),
}

/// Outcome of resolving one type description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub res_name: Name4,
    pub atom_name: Name4,
    pub is_het: bool,
}

/// One entry of the ordered naming table: a predicate over the description words plus
/// the extractor that builds the residue and atom names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRule {
    /// Required prefix of the first word (case-sensitive).
    pub primary: SmolStr,
    /// Optional required prefix of the second word.
    pub secondary: Option<SmolStr>,
    /// The rule applies only to descriptions with exactly this many words.
    pub word_count: usize,
    pub residue: ResidueSource,
    /// Index of the word that names the atom.
    pub atom_word: usize,
    pub is_het: bool,
}

impl TypeRule {
    pub fn matches(&self, words: &[&str]) -> bool {
        if words.len() != self.word_count {
            return false;
        }
        if !words[0].starts_with(self.primary.as_str()) {
            return false;
        }
        match &self.secondary {
            Some(prefix) => words.get(1).is_some_and(|w| w.starts_with(prefix.as_str())),
            None => true,
        }
    }

    /// Builds names from a description already accepted by [`TypeRule::matches`].
    pub fn apply(&self, words: &[&str]) -> Resolution {
        let res_name = match &self.residue {
            ResidueSource::Literal(name) => *name,
            ResidueSource::Word(i) => Name4::new(words.get(*i).copied().unwrap_or_default()),
        };
        let atom_name = standard_atom_name(words.get(self.atom_word).copied().unwrap_or_default());

        Resolution {
            res_name,
            atom_name,
            is_het: self.is_het,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.primary.is_empty() {
            return Err("primary prefix must not be empty".into());
        }
        if self.word_count == 0 || self.word_count > MAX_WORDS {
            return Err(format!(
                "word count {} is outside 1..={}",
                self.word_count, MAX_WORDS
            ));
        }
        if self.secondary.is_some() && self.word_count < 2 {
            return Err("a secondary prefix requires at least two words".into());
        }
        if self.atom_word >= self.word_count {
            return Err(format!(
                "atom word {} is out of range for {} words",
                self.atom_word, self.word_count
            ));
        }
        if let ResidueSource::Word(i) = self.residue {
            if i >= self.word_count {
                return Err(format!(
                    "residue word {} is out of range for {} words",
                    i, self.word_count
                ));
            }
        }
        Ok(())
    }
}

/// Ordered first-match rule table.
///
/// Declaration order is significant: a specific rule (e.g. `C-Term` + `AIB`) must come
/// before a general rule with the same word count (`C-Term` alone) to take effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<TypeRule>,
}

impl RuleSet {
    /// Validates every rule and keeps them in the given order.
    pub fn new(rules: Vec<TypeRule>) -> Result<Self, RuleError> {
        for (index, rule) in rules.iter().enumerate() {
            rule.validate()
                .map_err(|reason| RuleError::invalid(index, rule.primary.as_str(), reason))?;
        }
        Ok(Self { rules })
    }

    /// Applies the first rule matching the description words, if any.
    pub fn resolve(&self, words: &[&str]) -> Option<Resolution> {
        self.rules
            .iter()
            .find(|rule| rule.matches(words))
            .map(|rule| rule.apply(words))
    }

    pub fn rules(&self) -> &[TypeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
