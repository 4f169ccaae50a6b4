use thiserror::Error;

/// Boxed error produced by a converter that was run through one of the
/// strict `try_*` lookups.
pub type ConversionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by the strict lookups of [`ConvertingMap`](crate::ConvertingMap)
///
/// The lenient lookups (`get_converted`, `get_converted_or`, ...) never
/// produce these; they fold both cases into the caller's default.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The requested key was not found
    #[error("Key not found: {0}")]
    KeyNotFound(String),
    /// The key was found but the converter rejected its value
    #[error("Failed to convert value for key {key}: {source}")]
    Conversion {
        key: String,
        #[source]
        source: ConversionError,
    },
}

impl LookupError {
    /// Returns true if this error came from a missing key
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, LookupError::KeyNotFound(_))
    }

    /// Returns true if this error came from a failed conversion
    pub fn is_conversion(&self) -> bool {
        matches!(self, LookupError::Conversion { .. })
    }
}
