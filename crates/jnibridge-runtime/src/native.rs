//! Native ABI types seen by generated bridges.
//!
//! Primitive aliases follow the JNI primitive set. Handles are
//! `#[repr(transparent)]` wrappers so they are ABI-identical to the raw
//! pointers the native caller passes.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_void};

pub type jboolean = u8;
pub type jbyte = i8;
pub type jchar = u16;
pub type jshort = i16;
pub type jint = i32;
pub type jlong = i64;
pub type jfloat = f32;
pub type jdouble = f64;

/// `jboolean` value for `false`.
pub const JNI_FALSE: jboolean = 0;
/// `jboolean` value for `true`.
pub const JNI_TRUE: jboolean = 1;

/// The calling runtime's environment handle.
///
/// Borrowed for the duration of one bridge call; bridges never store it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvHandle(*mut c_void);

impl EnvHandle {
    /// Wrap a raw environment pointer.
    pub fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    /// A detached handle, for tests and for callers without an environment.
    pub fn detached() -> Self {
        Self(std::ptr::null_mut())
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.0
    }
}

/// Identity of the calling class or object.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassHandle(*mut c_void);

impl ClassHandle {
    pub fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }
}

/// A NUL-terminated string owned by whichever side allocated it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeString(pub *const c_char);

impl NativeString {
    pub const NULL: NativeString = NativeString(std::ptr::null());

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// An opaque pointer handed to the native side as a token.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativePointer(pub *mut c_void);

impl NativePointer {
    pub const NULL: NativePointer = NativePointer(std::ptr::null_mut());

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_pointer_sized() {
        assert_eq!(std::mem::size_of::<EnvHandle>(), std::mem::size_of::<*mut c_void>());
        assert_eq!(std::mem::size_of::<ClassHandle>(), std::mem::size_of::<*mut c_void>());
        assert_eq!(std::mem::size_of::<NativeString>(), std::mem::size_of::<*const c_char>());
        assert_eq!(std::mem::size_of::<NativePointer>(), std::mem::size_of::<*mut c_void>());
    }

    #[test]
    fn null_sentinels() {
        assert!(NativeString::NULL.is_null());
        assert!(NativePointer::NULL.is_null());
        assert!(EnvHandle::detached().as_raw().is_null());
    }
}
