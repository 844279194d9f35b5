use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("naming rule #{index} ('{primary}') is invalid: {reason}")]
    Invalid {
        index: usize,
        primary: String,
        reason: String,
    },

    #[error("failed to parse naming rules: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("failed to read naming rules from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RuleError {
    pub fn invalid(index: usize, primary: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            index,
            primary: primary.into(),
            reason: reason.into(),
        }
    }
}
