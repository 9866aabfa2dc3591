/// Result alias used across the crate.
pub type GyreResult<T> = Result<T, GyreError>;

/// Library error type.
///
/// Display prefixes are stable so callers can match on the error category in logs.
#[derive(thiserror::Error, Debug)]
pub enum GyreError {
    /// Inconsistent configuration detected before rendering starts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid numeric shape or orbit parameters.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// The output artifact could not be written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GyreError {
    /// Build a [`GyreError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GyreError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`GyreError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GyreError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
