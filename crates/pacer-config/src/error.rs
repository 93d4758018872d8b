use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or env var could not be merged into [`crate::PacerConfig`].
    #[error("failed to load pacer config: {0}")]
    Figment(#[from] figment::Error),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
