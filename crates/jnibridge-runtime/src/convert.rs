//! Standard conversion rules between native and Rust representations.
//!
//! Each rule takes the environment handle and the value, and returns a
//! `Result` so generated code can apply it uniformly as `rule(env, value)?`.
//! User-declared types supply rules with the same shape.

use std::ffi::{CStr, CString};

use crate::error::ConversionError;
use crate::native::{jboolean, EnvHandle, NativeString, JNI_FALSE, JNI_TRUE};

/// `jboolean` → `bool`. Any non-zero value is `true`.
pub fn bool_from_native(_env: EnvHandle, value: jboolean) -> Result<bool, ConversionError> {
    Ok(value != JNI_FALSE)
}

/// `bool` → `jboolean`.
pub fn bool_to_native(_env: EnvHandle, value: bool) -> Result<jboolean, ConversionError> {
    Ok(if value { JNI_TRUE } else { JNI_FALSE })
}

/// Copy a NUL-terminated native string into an owned `String`.
///
/// The pointer must stay valid for the duration of the bridged call, which is
/// the contract of every native caller.
pub fn string_from_native(_env: EnvHandle, value: NativeString) -> Result<String, ConversionError> {
    if value.is_null() {
        return Err(ConversionError::NullString);
    }
    // SAFETY: non-null and NUL-terminated per the boundary contract; only read
    // while the caller's frame is live.
    let c_str = unsafe { CStr::from_ptr(value.0) };
    Ok(c_str.to_str()?.to_owned())
}

/// Hand an owned string to the native side.
///
/// Ownership moves to the caller, who must return it through
/// [`free_native_string`].
pub fn string_to_native(_env: EnvHandle, value: String) -> Result<NativeString, ConversionError> {
    let c_string = CString::new(value).map_err(|e| ConversionError::InteriorNul {
        position: e.nul_position(),
    })?;
    Ok(NativeString(c_string.into_raw()))
}

/// Release a string previously produced by [`string_to_native`].
///
/// # Safety
///
/// `value` must come from [`string_to_native`] and must not be used again.
pub unsafe fn free_native_string(value: NativeString) {
    if !value.is_null() {
        drop(CString::from_raw(value.0 as *mut _));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> EnvHandle {
        EnvHandle::detached()
    }

    #[test]
    fn bool_round_trip() {
        for native in [JNI_FALSE, JNI_TRUE] {
            let rust = bool_from_native(env(), native).unwrap();
            assert_eq!(bool_to_native(env(), rust).unwrap(), native);
        }
    }

    #[test]
    fn nonzero_jboolean_is_true() {
        assert!(bool_from_native(env(), 7).unwrap());
    }

    #[test]
    fn string_round_trip() {
        let original = CString::new("SELECT * FROM t WHERE name = 'ü'").unwrap();
        let native = NativeString(original.as_ptr());

        let rust = string_from_native(env(), native).unwrap();
        let back = string_to_native(env(), rust).unwrap();

        let copied = unsafe { CStr::from_ptr(back.0) }.to_owned();
        assert_eq!(copied, original);
        unsafe { free_native_string(back) };
    }

    #[test]
    fn null_string_is_rejected() {
        let err = string_from_native(env(), NativeString::NULL).unwrap_err();
        assert!(matches!(err, ConversionError::NullString));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = CString::new(vec![0xff, 0xfe]).unwrap();
        let err = string_from_native(env(), NativeString(bytes.as_ptr())).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidUtf8(_)));
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = string_to_native(env(), "ab\0cd".to_string()).unwrap_err();
        match err {
            ConversionError::InteriorNul { position } => assert_eq!(position, 2),
            other => panic!("expected InteriorNul, got {other:?}"),
        }
    }
}
