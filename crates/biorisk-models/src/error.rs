use thiserror::Error;

use crate::scoring::ScoreFailure;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("missing value for field '{key}' required by model '{model_id}'")]
    MissingField { model_id: String, key: String },

    #[error("scoring failed for model '{model_id}': {reason}")]
    Scoring {
        model_id: String,
        #[source]
        reason: ScoreFailure,
    },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("catalog_version {found} is newer than supported ({supported})")]
    UnsupportedCatalogVersion { found: u32, supported: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}
