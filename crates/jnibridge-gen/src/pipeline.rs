//! One generation run: catalog in, rendered unit out.
//!
//! All validation and rendering happen before any write, so a failing run
//! leaves the destination untouched.

use std::path::Path;

use crate::ast::GeneratedFunction;
use crate::catalog::Catalog;
use crate::emit::{is_up_to_date, render_unit, write_unit};
use crate::error::Result;
use crate::generator::generate_bridges;

/// The in-memory result of a generation run.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub functions: Vec<GeneratedFunction>,
    pub text: String,
}

impl GeneratedUnit {
    /// Write the unit to `destination`.
    pub fn write_to(&self, destination: &Path) -> Result<()> {
        write_unit(destination, &self.text, self.functions.len())
    }

    /// Whether `destination` already matches this unit byte for byte.
    pub fn is_current(&self, destination: &Path) -> Result<bool> {
        is_up_to_date(&self.text, destination)
    }
}

/// Build the registry, generate every bridge and render the unit.
pub fn generate_unit(catalog: &Catalog) -> Result<GeneratedUnit> {
    let registry = catalog.registry()?;
    let pairs = catalog.function_pairs();
    let functions = generate_bridges(&pairs, &registry, &catalog.generator_options())?;
    let text = render_unit(&functions, &catalog.emit_options());
    Ok(GeneratedUnit { functions, text })
}

/// Generate from `catalog` and write the result to `destination`.
pub fn generate_to(catalog: &Catalog, destination: &Path) -> Result<GeneratedUnit> {
    let unit = generate_unit(catalog)?;
    unit.write_to(destination)?;
    Ok(unit)
}
