//! The context handle every trampoline forwards to the dispatcher.
//!
//! The surrounding runtime installs one context before any trampoline can
//! run. By default it is process-wide; with the `thread-local-context`
//! feature each thread installs its own.

use std::ptr;

use libc::{c_char, c_int, c_void};

use error::TrampolineError;
use dispatch::DispatchFn;

/// Leading part of the portable ABI's context. Only
/// `call_real_function_from_trampoline` is read here; the rest of the
/// capability table belongs to the runtime that owns the context.
#[repr(C)]
pub struct Context {
    pub name: *const c_char,
    pub abi_version: c_int,
    pub private: *mut c_void,
    pub call_real_function_from_trampoline: Option<DispatchFn>,
}

impl Context {
    pub fn new(name: *const c_char, abi_version: c_int, dispatch: DispatchFn) -> Self {
        Context {
            name,
            abi_version,
            private: ptr::null_mut(),
            call_real_function_from_trampoline: Some(dispatch),
        }
    }
}

#[cfg(not(feature = "thread-local-context"))]
mod storage {
    use std::sync::atomic::{AtomicPtr, Ordering};
    use super::Context;

    static CONTEXT: AtomicPtr<Context> = AtomicPtr::new(0 as *mut Context);

    #[inline(always)]
    pub fn get() -> *mut Context {
        CONTEXT.load(Ordering::Acquire)
    }

    pub fn swap(ctx: *mut Context) -> *mut Context {
        CONTEXT.swap(ctx, Ordering::AcqRel)
    }
}

#[cfg(feature = "thread-local-context")]
mod storage {
    use std::cell::Cell;
    use std::ptr;
    use super::Context;

    thread_local! {
        static CONTEXT: Cell<*mut Context> = Cell::new(ptr::null_mut());
    }

    #[inline(always)]
    pub fn get() -> *mut Context {
        CONTEXT.with(|c| c.get())
    }

    pub fn swap(ctx: *mut Context) -> *mut Context {
        CONTEXT.with(|c| c.replace(ctx))
    }
}

/// The context trampolines on this thread will pass on. Null until
/// [`install`] has run.
#[inline(always)]
pub fn current() -> *mut Context {
    storage::get()
}

/// Installs `ctx` and returns whatever was installed before (possibly null).
/// The context must stay alive for as long as a trampoline can be called.
pub fn install(ctx: *mut Context) -> Result<*mut Context, TrampolineError> {
    if ctx.is_null() {
        error!("refusing to install a null trampoline context");
        return Err(TrampolineError::NullContext);
    }
    let previous = storage::swap(ctx);
    if previous != ctx {
        debug!("installed trampoline context {:p} (previous {:p})", ctx, previous);
    }
    Ok(previous)
}

pub fn uninstall() -> *mut Context {
    let previous = storage::swap(ptr::null_mut());
    debug!("uninstalled trampoline context {:p}", previous);
    previous
}
