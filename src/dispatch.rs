//! The one seam between host-signature code and the portable ABI.
//!
//! Every trampoline ends up in [`invoke`], which hands the packed record to
//! the context's `call_real_function_from_trampoline` capability. That
//! function (owned by the portable runtime, not by this crate) casts the
//! implementation handle according to the call kind, calls it, and stores
//! the outcome in the record's `result` field.

use libc::c_void;

use args::PackedArgs;
use catalog::CallKind;
use ctx::{self, Context};

/// Type-erased pointer to the portable implementation bound into a
/// trampoline. Only the dispatcher knows its real signature.
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct ImplHandle(pub *const c_void);

impl ImplHandle {
    #[inline(always)]
    pub fn new(raw: *const c_void) -> ImplHandle {
        ImplHandle(raw)
    }

    pub fn as_ptr(self) -> *const c_void {
        self.0
    }
}

/// `(context, call kind, implementation, record address)`.
pub type DispatchFn = unsafe extern "C" fn(*mut Context, CallKind, ImplHandle, *mut c_void);

/// Forwards one call into the portable implementation.
///
/// Does not look at `kind`. A missing context or a context without the
/// dispatch capability means the runtime never finished wiring itself up;
/// the process is aborted rather than returning a result nobody wrote.
///
/// # Safety
/// `args` must point at the packed record matching `kind`, live for the
/// whole call.
#[inline(always)]
pub unsafe fn invoke(ctx: *mut Context, kind: CallKind, implementation: ImplHandle, args: *mut c_void) {
    match ctx.as_ref().and_then(|c| c.call_real_function_from_trampoline) {
        Some(dispatch) => dispatch(ctx, kind, implementation, args),
        None => unwired(),
    }
}

/// Shared body of every trampoline: pass the record to [`invoke`] under the
/// current context, then unpack its result.
///
/// # Safety
/// `implementation` must be a handle the installed dispatcher accepts for
/// `A::KIND`.
#[inline(always)]
pub unsafe fn forward<A: PackedArgs>(implementation: ImplHandle, mut args: A) -> A::Output {
    invoke(ctx::current(), A::KIND, implementation, &mut args as *mut A as *mut c_void);
    args.unpack()
}

#[cold]
#[inline(never)]
fn unwired() -> ! {
    unsafe { libc::abort() }
}

/// Body of the destroy placeholder. Reaching it means the registration
/// side installed it into a live host slot.
#[cold]
#[inline(never)]
pub fn unreachable_slot() -> ! {
    unsafe { libc::abort() }
}
