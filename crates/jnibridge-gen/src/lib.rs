//! Native-boundary bridge generation.
//!
//! Turns a catalog of native/high-level function pairs into a Rust source
//! unit with one `extern "system"` entry point per pair. Each entry point
//! converts its arguments, calls the high-level implementation inside an
//! exception-containment scope and converts the result back, returning the
//! type's sentinel value if anything fails.
//!
//! ## Modules
//!
//! - [`registry`] — Type descriptors and conversion rules
//! - [`signature`] — Function signatures and native/high-level pairs
//! - [`ast`] — Generated function representation and builder
//! - [`generator`] — The bridge generation protocol
//! - [`emit`] — Rendering and atomic output
//! - [`catalog`] — `bridges.toml` catalog parsing
//! - [`pipeline`] — A complete generation run

pub mod ast;
pub mod catalog;
pub mod emit;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod registry;
pub mod signature;

// Re-export key types for convenience
pub use ast::GeneratedFunction;
pub use catalog::Catalog;
pub use emit::{emit, render_unit, EmitOptions};
pub use error::BridgeGenError;
pub use generator::{generate_bridge, generate_bridges, GeneratorOptions};
pub use pipeline::{generate_to, generate_unit, GeneratedUnit};
pub use registry::{ConversionRule, TypeDescriptor, TypeRegistry};
pub use signature::{FunctionPair, FunctionSignature};
