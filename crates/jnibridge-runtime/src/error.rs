//! Runtime error types.

/// Failure converting a value between its native and Rust representations.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A null string handle was passed where a string is required.
    #[error("null string passed across the native boundary")]
    NullString,

    /// A native string did not hold valid UTF-8.
    #[error("native string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A Rust string contained an interior NUL and cannot become a C string.
    #[error("string contains an interior NUL byte at offset {position}")]
    InteriorNul { position: usize },
}

/// A failure raised inside the containment scope of a bridge.
///
/// Never crosses the native boundary: [`run_with_exception_conversion`]
/// logs it and substitutes the sentinel value.
///
/// [`run_with_exception_conversion`]: crate::containment::run_with_exception_conversion
#[derive(Debug, thiserror::Error)]
pub enum BoundaryCallError {
    /// The implementation or a conversion returned an error.
    #[error("bridged call failed: {0:#}")]
    Failed(anyhow::Error),

    /// The implementation panicked.
    #[error("bridged call panicked: {message}")]
    Panicked { message: String },
}
