//! In-memory representation of generated bridge functions.
//!
//! The generator assembles a [`GeneratedFunction`] through a
//! [`FunctionBuilder`]; the emitter serializes finished functions. Nodes are
//! immutable once built.
//!
//! # Example
//!
//! ```rust
//! use jnibridge_gen::ast::{Call, FunctionBuilder, Statement};
//!
//! let mut builder = FunctionBuilder::new("Java_Api_close", "Java_Api_close");
//! builder.add_parameter("env", "EnvHandle").unwrap();
//! builder.add_parameter("clazz", "ClassHandle").unwrap();
//! builder.returns("()");
//! builder.add_statement(Statement::Expr(Call::new("init_platform", Vec::<String>::new())));
//! builder.begin_containment("env", "()").unwrap();
//! builder.add_statement(Statement::let_call("callResult", Call::new("api::close", Vec::<String>::new())));
//! builder.end_containment("callResult").unwrap();
//!
//! let function = builder.build().unwrap();
//! assert_eq!(function.params.len(), 2);
//! ```

use std::collections::HashSet;

use crate::error::{BridgeGenError, Result};

/// A call expression, optionally followed by `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub callee: String,
    pub args: Vec<String>,
    /// Whether the error is propagated with `?`.
    pub propagate: bool,
}

impl Call {
    pub fn new(callee: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            callee: callee.into(),
            args: args.into_iter().map(Into::into).collect(),
            propagate: false,
        }
    }

    pub fn propagating(mut self) -> Self {
        self.propagate = true;
        self
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.callee, self.args.join(", "))?;
        if self.propagate {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// A statement in a bridge body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A call evaluated for its effect.
    Expr(Call),
    /// `let <name> = <value>;`
    Let { name: String, value: Call },
}

impl Statement {
    pub fn let_call(name: impl Into<String>, value: Call) -> Self {
        Self::Let {
            name: name.into(),
            value,
        }
    }
}

/// A named, typed parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

/// The exception-containment scope of a bridge.
///
/// Any failure inside evaluates the scope to `default_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentScope {
    /// Environment handle passed to the runtime.
    pub env: String,
    pub default_value: String,
    pub statements: Vec<Statement>,
    /// Name whose value the scope evaluates to on success.
    pub value: String,
}

/// A finished bridge function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    /// Rust identifier of the function.
    pub ident: String,
    /// Exported native symbol.
    pub export_name: String,
    /// All parameters, implicit handles first.
    pub params: Vec<Param>,
    pub return_type: String,
    /// Statements run before the containment scope opens.
    pub prologue: Vec<Statement>,
    pub containment: ContainmentScope,
}

impl GeneratedFunction {
    pub fn returns_unit(&self) -> bool {
        self.return_type == "()"
    }
}

struct OpenScope {
    env: String,
    default_value: String,
    statements: Vec<Statement>,
}

/// Incremental construction of a [`GeneratedFunction`].
///
/// Statements added while a containment scope is open go into the scope;
/// statements added before it opens form the prologue. Exactly one scope
/// must be opened and closed before [`build`](Self::build).
pub struct FunctionBuilder {
    ident: String,
    export_name: String,
    params: Vec<Param>,
    param_names: HashSet<String>,
    return_type: String,
    prologue: Vec<Statement>,
    open_scope: Option<OpenScope>,
    containment: Option<ContainmentScope>,
}

impl FunctionBuilder {
    /// Start a function with the given identifier and exported symbol.
    pub fn new(ident: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            export_name: export_name.into(),
            params: Vec::new(),
            param_names: HashSet::new(),
            return_type: "()".to_string(),
            prologue: Vec::new(),
            open_scope: None,
            containment: None,
        }
    }

    /// Append a parameter. Names must be unique.
    pub fn add_parameter(&mut self, name: impl Into<String>, ty: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        if !self.param_names.insert(name.clone()) {
            return Err(self.malformed(format!("duplicate parameter '{name}'")));
        }
        self.params.push(Param { name, ty: ty.into() });
        Ok(self)
    }

    pub fn returns(&mut self, ty: impl Into<String>) -> &mut Self {
        self.return_type = ty.into();
        self
    }

    /// Append a statement to the open scope, or to the prologue if none is open.
    pub fn add_statement(&mut self, statement: Statement) -> &mut Self {
        match self.open_scope.as_mut() {
            Some(scope) => scope.statements.push(statement),
            None => self.prologue.push(statement),
        }
        self
    }

    /// Open the containment scope.
    pub fn begin_containment(
        &mut self,
        env: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Result<()> {
        if self.open_scope.is_some() || self.containment.is_some() {
            return Err(self.malformed("containment scope opened twice".to_string()));
        }
        self.open_scope = Some(OpenScope {
            env: env.into(),
            default_value: default_value.into(),
            statements: Vec::new(),
        });
        Ok(())
    }

    /// Close the containment scope, which evaluates to `value`.
    pub fn end_containment(&mut self, value: impl Into<String>) -> Result<()> {
        let scope = self
            .open_scope
            .take()
            .ok_or_else(|| self.malformed("no containment scope is open".to_string()))?;
        self.containment = Some(ContainmentScope {
            env: scope.env,
            default_value: scope.default_value,
            statements: scope.statements,
            value: value.into(),
        });
        Ok(())
    }

    /// Finish the function.
    pub fn build(mut self) -> Result<GeneratedFunction> {
        if self.open_scope.is_some() {
            return Err(self.malformed("containment scope was never closed".to_string()));
        }
        let Some(containment) = self.containment.take() else {
            return Err(self.malformed("missing containment scope".to_string()));
        };
        Ok(GeneratedFunction {
            ident: self.ident,
            export_name: self.export_name,
            params: self.params,
            return_type: self.return_type,
            prologue: self.prologue,
            containment,
        })
    }

    fn malformed(&self, detail: String) -> BridgeGenError {
        BridgeGenError::MalformedBridge {
            function: self.ident.clone(),
            detail,
        }
    }
}
