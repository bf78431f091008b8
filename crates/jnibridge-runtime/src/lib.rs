//! Runtime support for generated jnibridge entry points.
//!
//! Every bridge emitted by `jnibridge-gen` calls into this crate: it attaches
//! the calling thread, converts arguments and results through the standard
//! conversion rules, and contains any failure of the high-level
//! implementation so that it never unwinds into the native caller.
//!
//! ## Modules
//!
//! - [`native`] — ABI primitive aliases and opaque handle types
//! - [`platform`] — Per-thread platform initialization
//! - [`containment`] — The exception-containment scope
//! - [`convert`] — Standard native ↔ Rust conversion rules
//! - [`error`] — Conversion and boundary error types

pub mod containment;
pub mod convert;
pub mod error;
pub mod native;
pub mod platform;

pub use containment::{contain, run_with_exception_conversion};
pub use error::{BoundaryCallError, ConversionError};
pub use native::{ClassHandle, EnvHandle, NativePointer, NativeString};
pub use platform::init_platform;

/// Everything a generated bridge module needs in scope.
pub mod prelude {
    pub use crate::containment::run_with_exception_conversion;
    pub use crate::convert;
    pub use crate::native::{
        jboolean, jbyte, jchar, jdouble, jfloat, jint, jlong, jshort, ClassHandle, EnvHandle,
        NativePointer, NativeString,
    };
    pub use crate::platform::init_platform;
}
