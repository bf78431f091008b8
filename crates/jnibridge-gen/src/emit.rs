//! Serialization of generated bridges into a single Rust source unit.
//!
//! The unit is rendered completely in memory before anything touches the
//! filesystem, then written through a temporary file in the destination
//! directory and renamed into place.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::ast::{ContainmentScope, GeneratedFunction, Statement};
use crate::error::Result;

/// First line of every generated unit.
pub const GENERATED_MARKER: &str = "// Generated by jnibridge, do not edit!";

/// Lints the generated code trips by construction.
pub const SUPPRESSED_LINTS: &[&str] = &[
    "non_snake_case",
    "unused_variables",
    "clippy::let_and_return",
    "clippy::let_unit_value",
    "clippy::redundant_locals",
];

/// Options controlling the unit preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Crate name generated code imports its runtime prelude from.
    pub runtime_crate: String,
    /// Extra `use` paths, emitted in order after the prelude.
    pub imports: Vec<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_crate: "jnibridge_runtime".to_string(),
            imports: Vec::new(),
        }
    }
}

/// Render all functions into one source unit.
pub fn render_unit(functions: &[GeneratedFunction], options: &EmitOptions) -> String {
    let mut lines = vec![GENERATED_MARKER.to_string(), String::new()];

    lines.push("#![allow(".to_string());
    for lint in SUPPRESSED_LINTS {
        lines.push(format!("    {lint},"));
    }
    lines.push(")]".to_string());
    lines.push(String::new());

    lines.push(format!("use {}::prelude::*;", options.runtime_crate));
    for import in &options.imports {
        lines.push(format!("use {};", import.trim().trim_end_matches(';')));
    }

    for function in functions {
        lines.push(String::new());
        lines.extend(render_function(function));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render a single bridge.
pub fn render_function(function: &GeneratedFunction) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "#[unsafe(export_name = \"{}\")]",
        escape(&function.export_name)
    ));
    lines.push(format!("pub extern \"system\" fn {}(", function.ident));
    for param in &function.params {
        lines.push(format!("    {}: {},", param.name, param.ty));
    }
    if function.returns_unit() {
        lines.push(") {".to_string());
    } else {
        lines.push(format!(") -> {} {{", function.return_type));
    }

    for statement in &function.prologue {
        lines.push(format!("    {}", render_statement(statement)));
    }
    lines.extend(render_containment(&function.containment));
    lines.push("}".to_string());
    lines
}

fn render_containment(scope: &ContainmentScope) -> Vec<String> {
    let mut lines = vec![format!(
        "    run_with_exception_conversion({}, {}, || {{",
        scope.env, scope.default_value
    )];
    for statement in &scope.statements {
        lines.push(format!("        {}", render_statement(statement)));
    }
    lines.push(format!("        Ok({})", scope.value));
    lines.push("    })".to_string());
    lines
}

fn render_statement(statement: &Statement) -> String {
    match statement {
        Statement::Expr(call) => format!("{call};"),
        Statement::Let { name, value } => format!("let {name} = {value};"),
    }
}

fn escape(symbol: &str) -> String {
    symbol.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render `functions` and write them to `destination`.
///
/// Missing parent directories are created and existing content is replaced.
pub fn emit(functions: &[GeneratedFunction], destination: &Path, options: &EmitOptions) -> Result<()> {
    let text = render_unit(functions, options);
    write_unit(destination, &text, functions.len())
}

/// Write an already rendered unit holding `functions` bridges.
pub(crate) fn write_unit(destination: &Path, text: &str, functions: usize) -> Result<()> {
    write_atomically(destination, text)?;
    info!(
        path = %destination.display(),
        functions,
        bytes = text.len(),
        "wrote bridge unit"
    );
    Ok(())
}

/// Replace `destination` with `contents` in one rename.
pub fn write_atomically(destination: &Path, contents: &str) -> Result<()> {
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(destination).map_err(|e| e.error)?;
    Ok(())
}

/// Whether `destination` already holds exactly `rendered`.
pub fn is_up_to_date(rendered: &str, destination: &Path) -> Result<bool> {
    match std::fs::read(destination) {
        Ok(existing) => Ok(existing == rendered.as_bytes()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_bridges, GeneratorOptions};
    use crate::registry::{TypeDescriptor, TypeRegistry};
    use crate::signature::{FunctionPair, FunctionSignature};

    fn prepare_stmt_bridges() -> Vec<GeneratedFunction> {
        let mut registry = TypeRegistry::standard();
        registry
            .register(
                TypeDescriptor::new("DbRef", "NativePointer", "NativePointer::NULL")
                    .with_from_native("DbRef::from_native")
                    .with_to_native("DbRef::to_native"),
            )
            .unwrap();
        registry
            .register(
                TypeDescriptor::new("StatusCode", "jint", "-1")
                    .with_to_native("StatusCode::to_native"),
            )
            .unwrap();
        let pairs = vec![
            FunctionPair::new(
                FunctionSignature::new("prepareStmt", ["NativePointer", "NativeString"], "jint"),
                FunctionSignature::new("prepareStmt", ["DbRef", "String"], "StatusCode"),
                "Java_com_example_SqliteApi_prepareStmt",
            ),
            FunctionPair::new(
                FunctionSignature::new("close", ["NativePointer"], "()"),
                FunctionSignature::new("close", ["DbRef"], "()"),
                "Java_com_example_SqliteApi_close",
            ),
        ];
        generate_bridges(&pairs, &registry, &GeneratorOptions::with_implementation("SqliteApi"))
            .unwrap()
    }

    fn options() -> EmitOptions {
        EmitOptions {
            imports: vec!["crate::api::{DbRef, SqliteApi, StatusCode}".to_string()],
            ..EmitOptions::default()
        }
    }

    const EXPECTED: &str = r#"// Generated by jnibridge, do not edit!

#![allow(
    non_snake_case,
    unused_variables,
    clippy::let_and_return,
    clippy::let_unit_value,
    clippy::redundant_locals,
)]

use jnibridge_runtime::prelude::*;
use crate::api::{DbRef, SqliteApi, StatusCode};

#[unsafe(export_name = "Java_com_example_SqliteApi_prepareStmt")]
pub extern "system" fn Java_com_example_SqliteApi_prepareStmt(
    env: EnvHandle,
    clazz: ClassHandle,
    p0: NativePointer,
    p1: NativeString,
) -> jint {
    init_platform();
    run_with_exception_conversion(env, -1, || {
        let localP0 = DbRef::from_native(env, p0)?;
        let localP1 = convert::string_from_native(env, p1)?;
        let callResult = SqliteApi::prepareStmt(localP0, localP1)?;
        let localCallResult = StatusCode::to_native(env, callResult)?;
        Ok(localCallResult)
    })
}

#[unsafe(export_name = "Java_com_example_SqliteApi_close")]
pub extern "system" fn Java_com_example_SqliteApi_close(
    env: EnvHandle,
    clazz: ClassHandle,
    p0: NativePointer,
) {
    init_platform();
    run_with_exception_conversion(env, (), || {
        let localP0 = DbRef::from_native(env, p0)?;
        let callResult = SqliteApi::close(localP0)?;
        Ok(callResult)
    })
}
"#;

    #[test]
    fn renders_expected_unit() {
        assert_eq!(render_unit(&prepare_stmt_bridges(), &options()), EXPECTED);
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_unit(&prepare_stmt_bridges(), &options());
        let second = render_unit(&prepare_stmt_bridges(), &options());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_catalog_still_has_header() {
        let text = render_unit(&[], &EmitOptions::default());
        assert!(text.starts_with(GENERATED_MARKER));
        assert!(text.contains("#![allow("));
        assert!(!text.contains("extern"));
    }

    #[test]
    fn import_semicolons_are_normalized() {
        let options = EmitOptions {
            imports: vec!["crate::api::DbRef;".to_string()],
            ..EmitOptions::default()
        };
        let text = render_unit(&[], &options);
        assert!(text.contains("use crate::api::DbRef;\n"));
        assert!(!text.contains(";;"));
    }

    #[test]
    fn emit_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("src").join("generated").join("jni.rs");
        emit(&prepare_stmt_bridges(), &destination, &options()).unwrap();
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), EXPECTED);
    }

    #[test]
    fn emit_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("jni.rs");
        std::fs::write(&destination, "stale").unwrap();
        emit(&prepare_stmt_bridges(), &destination, &options()).unwrap();
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), EXPECTED);

        // No staging files left behind
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn up_to_date_check() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("jni.rs");
        let rendered = render_unit(&prepare_stmt_bridges(), &options());

        assert!(!is_up_to_date(&rendered, &destination).unwrap());
        write_atomically(&destination, &rendered).unwrap();
        assert!(is_up_to_date(&rendered, &destination).unwrap());
        write_atomically(&destination, "// edited by hand\n").unwrap();
        assert!(!is_up_to_date(&rendered, &destination).unwrap());
    }
}
