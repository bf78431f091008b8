//! Per-thread platform initialization.
//!
//! Every generated entry point calls [`init_platform`] before touching
//! high-level code. Rust needs no runtime attach, so today the call only
//! records the thread as seen; it is the hook point where a real per-thread
//! attach (for example a JVM `AttachCurrentThread`) would go. The call is
//! idempotent.

use std::cell::Cell;

use tracing::trace;

thread_local! {
    static ATTACHED: Cell<bool> = const { Cell::new(false) };
}

/// Mark the calling thread as attached. Only the first call per thread logs.
pub fn init_platform() {
    ATTACHED.with(|attached| {
        if !attached.replace(true) {
            trace!(thread = ?std::thread::current().id(), "attached native thread");
        }
    });
}

/// Whether [`init_platform`] has run on the calling thread.
pub fn is_thread_attached() -> bool {
    ATTACHED.with(Cell::get)
}
