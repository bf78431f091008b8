//! `jnibridge check`: validate without writing.

use std::path::Path;

use anyhow::{Context, Result};
use jnibridge_gen::ast::Statement;
use jnibridge_gen::generator::LOCAL_PREFIX;
use jnibridge_gen::{generate_unit, GeneratedFunction};
use serde::Serialize;

use super::load_catalog;

#[derive(Debug, Serialize)]
struct CheckReport {
    catalog: String,
    types: usize,
    excluded: usize,
    bridges: Vec<BridgeSummary>,
}

#[derive(Debug, Serialize)]
struct BridgeSummary {
    symbol: String,
    params: Vec<String>,
    returns: String,
    conversions: usize,
}

impl BridgeSummary {
    fn from_function(function: &GeneratedFunction) -> Self {
        Self {
            symbol: function.export_name.clone(),
            params: function.params.iter().map(|p| format!("{}: {}", p.name, p.ty)).collect(),
            returns: function.return_type.clone(),
            conversions: function
                .containment
                .statements
                .iter()
                .filter(|s| matches!(s, Statement::Let { name, .. } if name.starts_with(LOCAL_PREFIX)))
                .count(),
        }
    }
}

/// Validate `catalog_path` and print what `generate` would produce.
pub fn run(catalog_path: &Path, json: bool) -> Result<()> {
    let report = build_report(catalog_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Catalog {}: OK", report.catalog);
        println!("  Types:    {}", report.types);
        println!("  Bridges:  {}", report.bridges.len());
        println!("  Excluded: {}", report.excluded);
        for bridge in &report.bridges {
            println!(
                "  {} ({}) -> {} [{} conversion(s)]",
                bridge.symbol,
                bridge.params.join(", "),
                bridge.returns,
                bridge.conversions
            );
        }
    }
    Ok(())
}

fn build_report(catalog_path: &Path) -> Result<CheckReport> {
    let catalog = load_catalog(catalog_path)?;
    let registry = catalog.registry().context("building type registry")?;
    let unit = generate_unit(&catalog)
        .with_context(|| format!("validating {}", catalog_path.display()))?;

    Ok(CheckReport {
        catalog: catalog_path.display().to_string(),
        types: registry.len(),
        excluded: catalog.functions.len() - catalog.active_functions().len(),
        bridges: unit.functions.iter().map(BridgeSummary::from_function).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_catalog(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridges.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn report_counts_conversions() {
        let (_dir, path) = write_catalog(
            r#"
[[functions]]
jni-signature = "Java_Api_exec"
native = { name = "exec", params = ["NativeString", "jint"], returns = "jboolean" }
actual = { name = "exec", params = ["String", "jint"], returns = "bool" }

[[functions]]
jni-signature = "Java_Api_skip"
excluded = true
native = { name = "skip" }
actual = { name = "skip" }
"#,
        );
        let report = build_report(&path).unwrap();
        assert_eq!(report.bridges.len(), 1);
        assert_eq!(report.excluded, 1);
        let bridge = &report.bridges[0];
        assert_eq!(bridge.symbol, "Java_Api_exec");
        assert_eq!(bridge.params.len(), 4);
        assert_eq!(bridge.returns, "jboolean");
        assert_eq!(bridge.conversions, 2);
    }

    #[test]
    fn pass_through_bridge_has_no_conversions() {
        let (_dir, path) = write_catalog(
            r#"
[[functions]]
jni-signature = "Java_Api_add"
native = { name = "add", params = ["jint", "jint"], returns = "jint" }
actual = { name = "add", params = ["jint", "jint"], returns = "jint" }
"#,
        );
        let report = build_report(&path).unwrap();
        assert_eq!(report.bridges[0].conversions, 0);
    }

    #[test]
    fn unknown_type_fails_check() {
        let (_dir, path) = write_catalog(
            r#"
[[functions]]
jni-signature = "Java_Api_step"
native = { name = "step", params = ["jlong"], returns = "jint" }
actual = { name = "step", params = ["Statement"], returns = "jint" }
"#,
        );
        let err = build_report(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unknown type 'Statement'"));
    }
}
