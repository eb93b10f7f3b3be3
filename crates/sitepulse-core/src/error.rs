use thiserror::Error;

/// Fatal engine errors. Soft evidence gaps are never reported through this
/// type; they surface as [`crate::DataQualityWarning`] values instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cannot generate without required {field} field")]
    MissingRequiredInput { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read niche vocabulary file {path}: {source}")]
    VocabularyIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse niche vocabulary: {0}")]
    VocabularyParse(#[from] serde_yaml::Error),

    #[error("niche vocabulary validation failed: {0}")]
    Validation(String),
}
