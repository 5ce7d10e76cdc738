/// Result alias used across the crate.
pub type HueloopResult<T> = Result<T, HueloopError>;

/// Error type for every fallible stage of the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum HueloopError {
    /// A value handed to an API is out of its accepted domain.
    #[error("validation error: {0}")]
    Validation(String),

    /// The animation configuration cannot produce a valid artifact.
    #[error("configuration error: {0}")]
    Config(String),

    /// The source image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The animation could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything else, usually carrying `anyhow` context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HueloopError {
    /// Build a [`HueloopError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HueloopError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`HueloopError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HueloopError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
