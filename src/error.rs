use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Invalid engine parameters, reported when an engine is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },

    #[error("step must be greater than zero")]
    ZeroStep,

    #[error("at least one phrase is required")]
    EmptyPhrases,
}

/// Rejects a zero millisecond setting, naming the offending field.
pub fn require_positive_ms(field: &'static str, ms: u64) -> Result<u64> {
    if ms == 0 {
        Err(ConfigurationError::ZeroInterval { field })
    } else {
        Ok(ms)
    }
}
