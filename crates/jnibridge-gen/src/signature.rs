//! Function signatures and native/high-level function pairs.

use crate::error::{BridgeGenError, Result};

/// A function's name, ordered parameter types and return type.
///
/// Types are referred to by registry name. The native variant draws from the
/// native primitive set; the actual variant may use any registered type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<String>,
    pub return_type: String,
}

impl FunctionSignature {
    pub fn new(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = impl Into<String>>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            return_type: return_type.into(),
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl std::fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "p{i}: {param}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// A native entry point paired with the high-level function it bridges to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionPair {
    /// Signature at the native boundary.
    pub native: FunctionSignature,
    /// Signature of the high-level implementation.
    pub actual: FunctionSignature,
    /// Exported symbol name, used verbatim.
    pub jni_signature: String,
    /// Whether the implementation returns `Result` and is called with `?`.
    pub fallible: bool,
}

impl FunctionPair {
    pub fn new(
        native: FunctionSignature,
        actual: FunctionSignature,
        jni_signature: impl Into<String>,
    ) -> Self {
        Self {
            native,
            actual,
            jni_signature: jni_signature.into(),
            fallible: true,
        }
    }

    pub fn infallible(mut self) -> Self {
        self.fallible = false;
        self
    }

    /// Check that both signatures have the same number of parameters.
    pub fn check_arity(&self) -> Result<()> {
        if self.native.arity() != self.actual.arity() {
            return Err(BridgeGenError::SignatureMismatch {
                symbol: self.jni_signature.clone(),
                detail: format!(
                    "native signature has {} parameter(s) but '{}' takes {}",
                    self.native.arity(),
                    self.actual.name,
                    self.actual.arity()
                ),
            });
        }
        Ok(())
    }

    /// Positional `(native, actual)` parameter type pairs.
    pub fn parameter_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.native
            .parameters
            .iter()
            .zip(&self.actual.parameters)
            .map(|(n, a)| (n.as_str(), a.as_str()))
    }
}
