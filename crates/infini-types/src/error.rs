//! Error types for infini-cards.

/// Errors produced by the carousel engine and its hosts.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    #[error("config error: {0}")]
    Config(String),

    #[error("measurement error: {0}")]
    Measurement(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CarouselError>;
