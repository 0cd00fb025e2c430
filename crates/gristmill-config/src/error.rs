//! Configuration error types.

/// Errors from reading, writing or decoding `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config.ron: {0}")]
    ReadError(#[source] std::io::Error),

    /// Creating the directory or writing the file failed.
    #[error("cannot write config.ron: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("config.ron is not valid RON for this version: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("cannot encode config as RON: {0}")]
    SerializeError(#[source] ron::Error),

    /// No per-user config directory exists on this platform.
    #[error("no config directory available on this platform")]
    NoConfigDir,
}
