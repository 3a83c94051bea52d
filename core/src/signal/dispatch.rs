//! Panic-guarded signal delivery.
//!
//! Signals originate in callbacks the host invokes from native code; an
//! unwind escaping back across that boundary aborts the whole process. Every
//! delivery therefore goes through [`dispatch`], which traps panics per
//! handler, logs them, and treats the signal as dropped for that handler.
//! No rollback is attempted; a handler that panicked mid-transition keeps
//! whatever partial state it reached.

use std::panic::{self, AssertUnwindSafe};

use super::handler::SignalHandler;
use super::signal::DutySignal;

/// Run a closure inside the panic trap. Returns `None` if it panicked.
pub(crate) fn guarded<R>(context: &'static str, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::error!(context, "panic caught at the signal dispatch boundary");
            None
        }
    }
}

/// Deliver one signal to each handler in order, exactly once per handler.
pub fn dispatch(handlers: &mut [&mut dyn SignalHandler], signal: &DutySignal) {
    for handler in handlers.iter_mut() {
        guarded("signal handler", || handler.handle_signal(signal));
    }
}

/// Deliver a batch of signals, preserving signal order across all handlers.
pub fn dispatch_all(handlers: &mut [&mut dyn SignalHandler], signals: &[DutySignal]) {
    for signal in signals {
        dispatch(handlers, signal);
    }
}
