//! The exception-containment scope wrapped around every bridged call.
//!
//! An error or panic escaping an `extern "system"` function is fatal to the
//! native caller. [`run_with_exception_conversion`] catches both and returns
//! the sentinel supplied by the generated code instead. A caller cannot tell a
//! sentinel produced by a contained failure from a genuine result with the
//! same value.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::error::BoundaryCallError;
use crate::native::EnvHandle;

/// Run `body`, turning any error or panic into a [`BoundaryCallError`].
pub fn contain<R, F>(body: F) -> Result<R, BoundaryCallError>
where
    F: FnOnce() -> anyhow::Result<R>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(BoundaryCallError::Failed(error)),
        Err(payload) => Err(BoundaryCallError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Run `body` inside the containment scope, returning `default` on failure.
///
/// `env` is only borrowed for the call.
pub fn run_with_exception_conversion<R, F>(env: EnvHandle, default: R, body: F) -> R
where
    F: FnOnce() -> anyhow::Result<R>,
{
    match contain(body) {
        Ok(value) => value,
        Err(error) => {
            warn!(env = ?env.as_raw(), %error, "contained failure at native boundary");
            default
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
