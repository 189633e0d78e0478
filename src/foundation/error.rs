/// Convenience result type used across the compiler.
pub type LyricResult<T> = Result<T, LyricError>;

/// Top-level error taxonomy used by compiler and session APIs.
///
/// Payload content never produces an error on its own: unknown tags and missing fields fall
/// back to named defaults. Errors are reserved for invalid options, unreadable input, font
/// registration, and cancelled exports.
#[derive(thiserror::Error, Debug)]
pub enum LyricError {
    /// Invalid caller-provided options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Structurally unusable scene payload (e.g. not an object at all).
    #[error("payload error: {0}")]
    Payload(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Text measurement backend could not be prepared.
    #[error("measurement error: {0}")]
    Measurement(String),

    /// An export loop observed its cancel token between frames.
    #[error("export cancelled at frame {frame}")]
    Cancelled {
        /// First frame that was not produced.
        frame: u64,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LyricError {
    /// Build a [`LyricError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LyricError::Payload`] value.
    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload(msg.into())
    }

    /// Build a [`LyricError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`LyricError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }
}

impl From<serde_json::Error> for LyricError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
