use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    pub info: RuleInfo,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RuleInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One `[[rule]]` table. Exactly one of `residue` and `residue_word` must be present.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
    pub words: usize,
    #[serde(default)]
    pub residue: Option<String>,
    #[serde(default)]
    pub residue_word: Option<usize>,
    pub atom_word: usize,
    #[serde(default)]
    pub het: bool,
}
