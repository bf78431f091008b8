//! The type registry: how each high-level type crosses the native boundary.
//!
//! Every type that may appear in a signature has a [`TypeDescriptor`] naming
//! its native representation, the conversion rules for each direction, and
//! the sentinel value a bridge returns when the call fails. The registry is
//! configuration data: the standard table plus whatever a catalog declares.

use std::collections::BTreeMap;

use crate::ast::Call;
use crate::error::{BridgeGenError, Result};

/// A callable applied as `path(env, value)?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRule {
    path: String,
}

impl ConversionRule {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The call expression converting `value` under environment `env`.
    pub fn apply(&self, env: &str, value: &str) -> Call {
        Call::new(&self.path, [env, value]).propagating()
    }
}

/// How a single type is represented at the native boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// High-level type name, as written in signatures.
    pub name: String,
    /// ABI-compatible type the value has at the boundary.
    pub native_representation: String,
    /// Native → high-level rule, used for arguments.
    pub from_native: Option<ConversionRule>,
    /// High-level → native rule, used for results.
    pub to_native: Option<ConversionRule>,
    /// Sentinel returned by a bridge whose call failed.
    pub default_value: String,
}

impl TypeDescriptor {
    /// A native primitive that passes through unchanged.
    pub fn native(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            native_representation: name.clone(),
            name,
            from_native: None,
            to_native: None,
            default_value: default_value.into(),
        }
    }

    /// A high-level type represented natively as `native`. Add rules with
    /// [`with_from_native`](Self::with_from_native) and
    /// [`with_to_native`](Self::with_to_native).
    pub fn new(
        name: impl Into<String>,
        native: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            native_representation: native.into(),
            from_native: None,
            to_native: None,
            default_value: default_value.into(),
        }
    }

    pub fn with_from_native(mut self, rule: impl Into<String>) -> Self {
        self.from_native = Some(ConversionRule::new(rule));
        self
    }

    pub fn with_to_native(mut self, rule: impl Into<String>) -> Self {
        self.to_native = Some(ConversionRule::new(rule));
        self
    }

    /// Whether the native and high-level representations coincide.
    pub fn is_pass_through(&self) -> bool {
        self.name == self.native_representation
    }

    /// Whether this is a native primitive: pass-through with no rules.
    pub fn is_native(&self) -> bool {
        self.is_pass_through() && self.from_native.is_none() && self.to_native.is_none()
    }

    /// Whether an argument of this type needs a `from_native` step.
    pub fn needs_argument_conversion(&self) -> bool {
        self.from_native.is_some()
    }

    /// Whether a result of this type needs a `to_native` step.
    pub fn needs_return_conversion(&self) -> bool {
        self.to_native.is_some()
    }

    /// Check the descriptor invariants.
    pub fn validate(&self) -> Result<()> {
        let invalid = |detail: &str| BridgeGenError::InvalidDescriptor {
            name: self.name.clone(),
            detail: detail.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("type name is empty"));
        }
        if self.native_representation.trim().is_empty() {
            return Err(invalid("native representation is empty"));
        }
        if self.default_value.trim().is_empty() {
            return Err(invalid("default value is empty"));
        }
        if self.from_native.is_none() && self.to_native.is_none() && !self.is_pass_through() {
            return Err(BridgeGenError::InvalidDescriptor {
                name: self.name.clone(),
                detail: format!(
                    "no conversion rules, so it must be its own native representation (found '{}')",
                    self.native_representation
                ),
            });
        }
        for rule in self.from_native.iter().chain(&self.to_native) {
            if rule.path().trim().is_empty() {
                return Err(invalid("conversion rule path is empty"));
            }
        }
        Ok(())
    }
}

/// Closed table of type descriptors keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table: JNI primitives, opaque handles, unit, `bool` and
    /// `String`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let builtins = [
            TypeDescriptor::native("jboolean", "0"),
            TypeDescriptor::native("jbyte", "0"),
            TypeDescriptor::native("jchar", "0"),
            TypeDescriptor::native("jshort", "0"),
            TypeDescriptor::native("jint", "0"),
            TypeDescriptor::native("jlong", "0"),
            TypeDescriptor::native("jfloat", "0.0"),
            TypeDescriptor::native("jdouble", "0.0"),
            TypeDescriptor::native("NativeString", "NativeString::NULL"),
            TypeDescriptor::native("NativePointer", "NativePointer::NULL"),
            TypeDescriptor::native("()", "()"),
            TypeDescriptor::new("bool", "jboolean", "0")
                .with_from_native("convert::bool_from_native")
                .with_to_native("convert::bool_to_native"),
            TypeDescriptor::new("String", "NativeString", "NativeString::NULL")
                .with_from_native("convert::string_from_native")
                .with_to_native("convert::string_to_native"),
        ];
        for descriptor in builtins {
            registry.types.insert(descriptor.name.clone(), descriptor);
        }
        registry
    }

    /// Add a descriptor after validating it.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<()> {
        descriptor.validate()?;
        if self.types.contains_key(&descriptor.name) {
            return Err(BridgeGenError::DuplicateType(descriptor.name));
        }
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a type, failing with [`BridgeGenError::UnknownType`].
    pub fn lookup(&self, name: &str) -> Result<&TypeDescriptor> {
        self.types.get(name).ok_or_else(|| BridgeGenError::UnknownType {
            name: name.to_string(),
            context: None,
        })
    }

    pub fn needs_argument_conversion(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.needs_argument_conversion())
    }

    pub fn needs_return_conversion(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.needs_return_conversion())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid() {
        let registry = TypeRegistry::standard();
        for descriptor in registry.iter() {
            descriptor.validate().unwrap();
        }
        assert!(registry.contains("jint"));
        assert!(registry.contains("String"));
        assert!(registry.contains("()"));
    }

    #[test]
    fn native_primitives_need_no_conversion() {
        let registry = TypeRegistry::standard();
        assert!(!registry.needs_argument_conversion("jlong").unwrap());
        assert!(!registry.needs_return_conversion("jlong").unwrap());
        assert!(registry.lookup("jdouble").unwrap().is_native());
    }

    #[test]
    fn bool_and_string_convert_both_ways() {
        let registry = TypeRegistry::standard();
        for name in ["bool", "String"] {
            assert!(registry.needs_argument_conversion(name).unwrap());
            assert!(registry.needs_return_conversion(name).unwrap());
        }
        assert_eq!(registry.lookup("String").unwrap().native_representation, "NativeString");
    }

    #[test]
    fn unknown_type_lookup_fails() {
        let registry = TypeRegistry::standard();
        let err = registry.lookup("Cursor").unwrap_err();
        match err {
            BridgeGenError::UnknownType { name, .. } => assert_eq!(name, "Cursor"),
            other => panic!("expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn pass_through_requires_identical_representation() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .register(TypeDescriptor::new("StatusCode", "jint", "-1"))
            .unwrap_err();
        assert!(matches!(err, BridgeGenError::InvalidDescriptor { .. }));
    }

    #[test]
    fn directional_descriptor_is_accepted() {
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDescriptor::new("StatusCode", "jint", "-1")
                    .with_to_native("StatusCode::to_native"),
            )
            .unwrap();
        assert!(!registry.needs_argument_conversion("StatusCode").unwrap());
        assert!(registry.needs_return_conversion("StatusCode").unwrap());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = TypeRegistry::standard();
        let err = registry
            .register(TypeDescriptor::native("jint", "0"))
            .unwrap_err();
        assert!(matches!(err, BridgeGenError::DuplicateType(name) if name == "jint"));
    }

    #[test]
    fn empty_default_is_invalid() {
        let descriptor = TypeDescriptor::native("jint", " ");
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn rule_renders_as_propagating_call() {
        let rule = ConversionRule::new("DbRef::from_native");
        let call = rule.apply("env", "p0");
        assert_eq!(call.to_string(), "DbRef::from_native(env, p0)?");
    }
}
