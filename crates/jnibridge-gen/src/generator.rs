//! Bridge generation: one native entry point per function pair.
//!
//! Every generated bridge has the same shape:
//! - the implicit `env` and `clazz` handles, then `p0..pN` with native types
//! - `init_platform()` as its first statement
//! - a containment scope with the return type's sentinel, inside which each
//!   argument is converted, the implementation is called and the result is
//!   converted back
//!
//! Local names derive from the value they hold (`p1` → `localP1`,
//! `callResult` → `localCallResult`) so output is stable across runs.

use std::collections::HashSet;

use tracing::debug;

use crate::ast::{Call, FunctionBuilder, GeneratedFunction, Statement};
use crate::error::{BridgeGenError, Result};
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::signature::FunctionPair;

/// Name of the implicit environment handle parameter.
pub const ENV_PARAM: &str = "env";
/// Name of the implicit caller-identity parameter.
pub const CALLER_PARAM: &str = "clazz";
/// Runtime type of the environment handle.
pub const ENV_TYPE: &str = "EnvHandle";
/// Runtime type of the caller-identity handle.
pub const CALLER_TYPE: &str = "ClassHandle";
/// Prefix of every binding that holds a converted value.
pub const LOCAL_PREFIX: &str = "local";
/// Binding that holds the implementation's result.
pub const RETURN_VALUE_NAME: &str = "callResult";
/// Runtime function attaching the calling thread.
pub const INIT_PLATFORM: &str = "init_platform";

/// Options that shape generated calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Path prefix of the high-level implementations (e.g. `crate::api`).
    /// Empty means implementations are called by bare name.
    pub implementation: String,
}

impl GeneratorOptions {
    pub fn with_implementation(implementation: impl Into<String>) -> Self {
        Self {
            implementation: implementation.into(),
        }
    }

    fn callee(&self, name: &str) -> String {
        if self.implementation.is_empty() {
            name.to_string()
        } else {
            format!("{}::{name}", self.implementation)
        }
    }
}

/// Generate bridges for a whole catalog, in catalog order.
///
/// Fails on the first invalid pair; no partial result is returned.
pub fn generate_bridges(
    pairs: &[FunctionPair],
    registry: &TypeRegistry,
    options: &GeneratorOptions,
) -> Result<Vec<GeneratedFunction>> {
    let mut symbols = HashSet::new();
    let mut idents = HashSet::new();
    let mut functions = Vec::with_capacity(pairs.len());

    for pair in pairs {
        if !symbols.insert(pair.jni_signature.as_str()) {
            return Err(BridgeGenError::DuplicateSymbol(pair.jni_signature.clone()));
        }
        let function = generate_bridge(pair, registry, options)?;
        if !idents.insert(function.ident.clone()) {
            return Err(BridgeGenError::MalformedBridge {
                function: function.ident,
                detail: format!(
                    "identifier derived from '{}' collides with an earlier bridge",
                    pair.jni_signature
                ),
            });
        }
        functions.push(function);
    }

    Ok(functions)
}

/// Generate the bridge for a single function pair.
pub fn generate_bridge(
    pair: &FunctionPair,
    registry: &TypeRegistry,
    options: &GeneratorOptions,
) -> Result<GeneratedFunction> {
    pair.check_arity()?;
    let ident = bridge_ident(&pair.jni_signature)?;

    // Resolve and check every position before building anything
    let mut arguments = Vec::with_capacity(pair.actual.arity());
    for (i, (native, actual)) in pair.parameter_pairs().enumerate() {
        let descriptor = resolve(registry, pair, native, actual, &format!("parameter p{i}"))?;
        if !descriptor.needs_argument_conversion() && !descriptor.is_pass_through() {
            return Err(mismatch(
                pair,
                format!("parameter p{i}: type '{actual}' has no from-native rule"),
            ));
        }
        arguments.push(descriptor);
    }
    let return_descriptor = resolve(
        registry,
        pair,
        &pair.native.return_type,
        &pair.actual.return_type,
        "return type",
    )?;
    if !return_descriptor.needs_return_conversion() && !return_descriptor.is_pass_through() {
        return Err(mismatch(
            pair,
            format!(
                "return type '{}' has no to-native rule",
                pair.actual.return_type
            ),
        ));
    }

    let mut builder = FunctionBuilder::new(ident, pair.jni_signature.as_str());
    builder.add_parameter(ENV_PARAM, ENV_TYPE)?;
    builder.add_parameter(CALLER_PARAM, CALLER_TYPE)?;
    for (i, native) in pair.native.parameters.iter().enumerate() {
        builder.add_parameter(format!("p{i}"), native.as_str())?;
    }
    builder.returns(pair.native.return_type.as_str());

    builder.add_statement(Statement::Expr(Call::new(INIT_PLATFORM, Vec::<String>::new())));
    builder.begin_containment(ENV_PARAM, return_descriptor.default_value.as_str())?;

    let mut argument_names = Vec::with_capacity(arguments.len());
    for (i, descriptor) in arguments.iter().enumerate() {
        let param = format!("p{i}");
        match &descriptor.from_native {
            Some(rule) => {
                let local = local_name(&param);
                builder.add_statement(Statement::let_call(local.as_str(), rule.apply(ENV_PARAM, &param)));
                argument_names.push(local);
            }
            None => argument_names.push(param),
        }
    }

    let mut call = Call::new(options.callee(&pair.actual.name), argument_names);
    if pair.fallible {
        call = call.propagating();
    }
    builder.add_statement(Statement::let_call(RETURN_VALUE_NAME, call));

    let value = match &return_descriptor.to_native {
        Some(rule) => {
            let local = local_name(RETURN_VALUE_NAME);
            builder.add_statement(Statement::let_call(
                local.as_str(),
                rule.apply(ENV_PARAM, RETURN_VALUE_NAME),
            ));
            local
        }
        None => RETURN_VALUE_NAME.to_string(),
    };
    builder.end_containment(value)?;

    let function = builder.build()?;
    debug!(
        symbol = %pair.jni_signature,
        implementation = %pair.actual.name,
        params = pair.native.arity(),
        "generated bridge"
    );
    Ok(function)
}

/// `p0` → `localP0`, `callResult` → `localCallResult`.
pub fn local_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{LOCAL_PREFIX}{}{}", first.to_uppercase(), chars.as_str()),
        None => LOCAL_PREFIX.to_string(),
    }
}

/// Rust identifier for the bridge exported as `symbol`.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a leading digit gets a `_`
/// prefix.
pub fn bridge_ident(symbol: &str) -> Result<String> {
    if symbol.trim().is_empty() {
        return Err(BridgeGenError::SignatureMismatch {
            symbol: symbol.to_string(),
            detail: "exported symbol name is empty".to_string(),
        });
    }
    let mut ident: String = symbol
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    Ok(ident)
}

/// Look up `actual` and check it is carried natively as `native`.
fn resolve<'r>(
    registry: &'r TypeRegistry,
    pair: &FunctionPair,
    native: &str,
    actual: &str,
    position: &str,
) -> Result<&'r TypeDescriptor> {
    let with_context = |err: BridgeGenError| match err {
        BridgeGenError::UnknownType { name, .. } => BridgeGenError::UnknownType {
            name,
            context: Some(format!("{position} of '{}'", pair.jni_signature)),
        },
        other => other,
    };

    let native_descriptor = registry.lookup(native).map_err(with_context)?;
    if !native_descriptor.is_native() {
        return Err(mismatch(
            pair,
            format!("{position}: '{native}' is not a native type"),
        ));
    }

    let descriptor = registry.lookup(actual).map_err(with_context)?;
    if descriptor.native_representation != native {
        return Err(mismatch(
            pair,
            format!(
                "{position}: '{actual}' is represented natively as '{}', not '{native}'",
                descriptor.native_representation
            ),
        ));
    }
    Ok(descriptor)
}

fn mismatch(pair: &FunctionPair, detail: String) -> BridgeGenError {
    BridgeGenError::SignatureMismatch {
        symbol: pair.jni_signature.clone(),
        detail,
    }
}
