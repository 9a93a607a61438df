#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
}

/// Raised when a record does not carry what the target shape requires
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ShapeError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("field `{field}` is invalid: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: ConversionError,
    },
    #[error("field `{field}` is outside the supported range")]
    OutOfRange { field: &'static str },
}

impl ShapeError {
    /// Returns `true` if the shape error is [`MissingField`].
    ///
    /// [`MissingField`]: ShapeError::MissingField
    #[must_use]
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(..))
    }
}
