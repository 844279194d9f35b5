use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid chain label '{label}': {reason}")]
    InvalidChainLabel { label: String, reason: &'static str },
}

impl Error {
    pub fn invalid_chain_label(label: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidChainLabel {
            label: label.into(),
            reason,
        }
    }
}
