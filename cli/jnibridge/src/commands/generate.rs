//! `jnibridge generate`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use jnibridge_gen::{generate_unit, Catalog};
use tracing::info;

use super::load_catalog;

/// Generate the unit for `catalog_path` and write it, or with `check`, verify
/// that the file on disk is current.
pub fn run(catalog_path: &Path, output: Option<&Path>, check: bool) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let destination = resolve_destination(catalog_path, &catalog, output)?;
    info!(
        catalog = %catalog_path.display(),
        destination = %destination.display(),
        check,
        "resolved output"
    );

    let unit = generate_unit(&catalog)
        .with_context(|| format!("generating bridges from {}", catalog_path.display()))?;

    if check {
        if !unit.is_current(&destination)? {
            bail!(
                "{} is out of date; run `jnibridge generate --catalog {}`",
                destination.display(),
                catalog_path.display()
            );
        }
        println!(
            "{} is up to date ({} bridges)",
            destination.display(),
            unit.functions.len()
        );
        return Ok(());
    }

    unit.write_to(&destination)
        .with_context(|| format!("writing {}", destination.display()))?;

    println!(
        "Generated {} bridge(s) → {}",
        unit.functions.len(),
        destination.display()
    );
    Ok(())
}

/// `--output` wins; otherwise `[output].path` relative to the catalog file.
fn resolve_destination(catalog_path: &Path, catalog: &Catalog, output: Option<&Path>) -> Result<PathBuf> {
    if let Some(output) = output {
        return Ok(output.to_path_buf());
    }
    match &catalog.output.path {
        Some(path) => {
            let base = catalog_path.parent().unwrap_or_else(|| Path::new(""));
            Ok(base.join(path))
        }
        None => bail!(
            "no output path: pass --output or set [output].path in {}",
            catalog_path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[output]
path = "src/generated_jni.rs"

[[functions]]
jni-signature = "Java_Api_add"
native = { name = "add", params = ["jint", "jint"], returns = "jint" }
actual = { name = "add", params = ["jint", "jint"], returns = "jint" }
"#;

    #[test]
    fn output_flag_overrides_catalog() {
        let catalog = Catalog::parse(CATALOG).unwrap();
        let dest = resolve_destination(
            Path::new("proj/bridges.toml"),
            &catalog,
            Some(Path::new("elsewhere/jni.rs")),
        )
        .unwrap();
        assert_eq!(dest, PathBuf::from("elsewhere/jni.rs"));
    }

    #[test]
    fn catalog_path_is_relative_to_catalog() {
        let catalog = Catalog::parse(CATALOG).unwrap();
        let dest = resolve_destination(Path::new("proj/bridges.toml"), &catalog, None).unwrap();
        assert_eq!(dest, PathBuf::from("proj/src/generated_jni.rs"));
    }

    #[test]
    fn missing_output_is_an_error() {
        let catalog = Catalog::parse("").unwrap();
        assert!(resolve_destination(Path::new("bridges.toml"), &catalog, None).is_err());
    }

    #[test]
    fn generate_then_check() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("bridges.toml");
        std::fs::write(&catalog_path, CATALOG).unwrap();

        assert!(run(&catalog_path, None, true).is_err());
        run(&catalog_path, None, false).unwrap();
        let generated = dir.path().join("src").join("generated_jni.rs");
        assert!(generated.is_file());
        run(&catalog_path, None, true).unwrap();

        std::fs::write(&generated, "// hand edit\n").unwrap();
        assert!(run(&catalog_path, None, true).is_err());
    }

    #[test]
    fn missing_catalog_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope.toml"), None, false).unwrap_err();
        assert!(err.to_string().contains("catalog file not found"));
    }
}
