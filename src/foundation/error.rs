/// Convenience result type used across the crate.
pub type HighlightResult<T> = Result<T, HighlightError>;

/// Single failure surface for every stage: decode, merge, blend and encode.
#[derive(thiserror::Error, Debug)]
pub enum HighlightError {
    /// Malformed or unsupported encoded image bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// The codec could not write the requested output format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Buffers or region records whose shape does not match what the call expects.
    #[error("shape error: {0}")]
    Shape(String),

    /// Option values outside their accepted range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Arithmetic or backend failure while building or applying a batch.
    #[error("compute error: {0}")]
    Compute(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HighlightError {
    /// Build a [`HighlightError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HighlightError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`HighlightError::Shape`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Build a [`HighlightError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HighlightError::Compute`] value.
    pub fn compute(msg: impl Into<String>) -> Self {
        Self::Compute(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
