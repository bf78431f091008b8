//! CLI command implementations.

pub mod check;
pub mod generate;

use std::path::Path;

use anyhow::{bail, Context, Result};
use jnibridge_gen::Catalog;

/// Load a catalog file, with the path in any error.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.is_file() {
        bail!("catalog file not found: {}", path.display());
    }
    Catalog::load(path).with_context(|| format!("loading {}", path.display()))
}
