//! Generation-time error types.
//!
//! Every variant is fatal to a generation run and is raised before anything
//! is written to the output destination.

/// Errors that can occur while generating bridges.
#[derive(Debug, thiserror::Error)]
pub enum BridgeGenError {
    /// A type named in a signature has no registry entry.
    #[error("unknown type '{name}'{}", context_suffix(.context))]
    UnknownType { name: String, context: Option<String> },

    /// A native/actual signature pair does not line up.
    #[error("signature mismatch for '{symbol}': {detail}")]
    SignatureMismatch { symbol: String, detail: String },

    /// A type descriptor violates the registry invariants.
    #[error("invalid descriptor for type '{name}': {detail}")]
    InvalidDescriptor { name: String, detail: String },

    /// A type was registered twice.
    #[error("type '{0}' is already registered")]
    DuplicateType(String),

    /// Two pairs export the same native symbol.
    #[error("native symbol '{0}' is exported by more than one function pair")]
    DuplicateSymbol(String),

    /// The function builder was driven into an invalid state.
    #[error("malformed bridge '{function}': {detail}")]
    MalformedBridge { function: String, detail: String },

    /// Failed to interpret a catalog file.
    #[error("invalid catalog: {detail}")]
    InvalidCatalog { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(ctx) => format!(" (in {ctx})"),
        None => String::new(),
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, BridgeGenError>;
