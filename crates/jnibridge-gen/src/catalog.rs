//! Catalog file (`bridges.toml`) parsing.
//!
//! A catalog declares the output destination, the types beyond the standard
//! registry, and the function pairs to bridge, in order.
//!
//! ```toml
//! [output]
//! path = "src/generated_jni.rs"
//! implementation = "crate::api::SqliteApi"
//! imports = ["crate::api::{DbRef, StatusCode}"]
//!
//! [[types]]
//! name = "DbRef"
//! native = "NativePointer"
//! from-native = "DbRef::from_native"
//! to-native = "DbRef::to_native"
//! default = "NativePointer::NULL"
//!
//! [[functions]]
//! jni-signature = "Java_com_example_SqliteApi_close"
//! native = { name = "close", params = ["NativePointer"] }
//! actual = { name = "close", params = ["DbRef"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::emit::EmitOptions;
use crate::error::{BridgeGenError, Result};
use crate::generator::GeneratorOptions;
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::signature::{FunctionPair, FunctionSignature};

/// A complete catalog parsed from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Where and how the unit is written.
    #[serde(default)]
    pub output: OutputConfig,
    /// Types added to the standard registry.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// Function pairs, in emission order.
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
}

/// The `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination of the generated unit, relative to the catalog.
    #[serde(default)]
    pub path: Option<String>,
    /// Path prefix of the high-level implementations.
    #[serde(default)]
    pub implementation: String,
    /// Extra `use` paths for the generated unit.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Crate providing the runtime prelude.
    #[serde(default = "default_runtime_crate", alias = "runtime_crate", rename = "runtime-crate")]
    pub runtime_crate: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            implementation: String::new(),
            imports: Vec::new(),
            runtime_crate: default_runtime_crate(),
        }
    }
}

fn default_runtime_crate() -> String {
    EmitOptions::default().runtime_crate
}

/// A user-declared type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Native representation.
    pub native: String,
    #[serde(default, alias = "from_native", rename = "from-native")]
    pub from_native: Option<String>,
    #[serde(default, alias = "to_native", rename = "to-native")]
    pub to_native: Option<String>,
    /// Sentinel returned on failure.
    pub default: String,
}

impl TypeDecl {
    pub fn to_descriptor(&self) -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new(&self.name, &self.native, &self.default);
        if let Some(rule) = &self.from_native {
            descriptor = descriptor.with_from_native(rule);
        }
        if let Some(rule) = &self.to_native {
            descriptor = descriptor.with_to_native(rule);
        }
        descriptor
    }
}

/// One function pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Exported native symbol, used verbatim.
    #[serde(alias = "jni_signature", rename = "jni-signature")]
    pub jni_signature: String,
    pub native: SignatureDecl,
    pub actual: SignatureDecl,
    /// Whether the implementation returns `Result`.
    #[serde(default = "default_fallible")]
    pub fallible: bool,
    /// Whether this pair is skipped.
    #[serde(default)]
    pub excluded: bool,
}

fn default_fallible() -> bool {
    true
}

/// A signature as written in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default = "default_returns")]
    pub returns: String,
}

fn default_returns() -> String {
    "()".to_string()
}

impl SignatureDecl {
    fn to_signature(&self) -> FunctionSignature {
        FunctionSignature::new(&self.name, &self.params, &self.returns)
    }
}

impl Catalog {
    /// Parse a catalog from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(input)?;

        for (i, func) in catalog.functions.iter().enumerate() {
            if func.jni_signature.trim().is_empty() {
                return Err(BridgeGenError::InvalidCatalog {
                    detail: format!("functions[{i}]: jni-signature is empty"),
                });
            }
            if func.actual.name.trim().is_empty() {
                return Err(BridgeGenError::InvalidCatalog {
                    detail: format!("functions[{i}] ('{}'): actual.name is empty", func.jni_signature),
                });
            }
        }

        Ok(catalog)
    }

    /// Parse a catalog from a file path.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Return only the non-excluded functions.
    pub fn active_functions(&self) -> Vec<&FunctionDecl> {
        self.functions.iter().filter(|f| !f.excluded).collect()
    }

    /// The standard registry extended with the declared types.
    pub fn registry(&self) -> Result<TypeRegistry> {
        let mut registry = TypeRegistry::standard();
        for decl in &self.types {
            registry.register(decl.to_descriptor())?;
        }
        Ok(registry)
    }

    /// Function pairs for the active functions, in catalog order.
    pub fn function_pairs(&self) -> Vec<FunctionPair> {
        self.active_functions()
            .into_iter()
            .map(|decl| {
                let mut pair = FunctionPair::new(
                    decl.native.to_signature(),
                    decl.actual.to_signature(),
                    &decl.jni_signature,
                );
                pair.fallible = decl.fallible;
                pair
            })
            .collect()
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions::with_implementation(self.output.implementation.as_str())
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            runtime_crate: self.output.runtime_crate.clone(),
            imports: self.output.imports.clone(),
        }
    }
}
