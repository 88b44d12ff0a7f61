//! Trampoline emitter.
//!
//! `trampoline!(Kind, [vis] name, implementation)` expands to one
//! `extern "C"` function with exactly the host's signature for `Kind`. Its
//! body packs the native arguments into the kind's record and goes through
//! [`dispatch::forward`](../dispatch/fn.forward.html). Each expansion is
//! followed by a coercion to the matching [`host`](../host/index.html)
//! function-pointer type, so a signature that drifts from the host's does
//! not build.
//!
//! ```ignore
//! trampoline!(O, pub point_add_trampoline, point_add_impl);
//!
//! let slot = NativeSlot::O(point_add_trampoline);
//! install_into_type(slot.address()?);
//! ```

use std::fmt::{Debug, Formatter};

use libc::c_void;

use catalog::CallKind;
use error::TrampolineError;
use host;

#[macro_export]
macro_rules! trampoline {
    (NoArgs, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       _noargs: *mut $crate::host::Object) -> *mut $crate::host::Object {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsNoArgs { self_: self_, ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::NoArgsFunc = $sym;
    };
    (O, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       arg: *mut $crate::host::Object) -> *mut $crate::host::Object {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsO { self_: self_, arg: arg, ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::OFunc = $sym;
    };
    (VarArgs, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       args: *mut $crate::host::Object) -> *mut $crate::host::Object {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsVarArgs { self_: self_, args: args, ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::VarArgsFunc = $sym;
    };
    (Keywords, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       args: *mut $crate::host::Object,
                                       kw: *mut $crate::host::Object) -> *mut $crate::host::Object {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsKeywords { self_: self_, args: args, kw: kw,
                                             ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::KeywordsFunc = $sym;
    };
    (InitProc, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       args: *mut $crate::host::Object,
                                       kw: *mut $crate::host::Object) -> $crate::__private::c_int {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsInitProc { self_: self_, args: args, kw: kw,
                                             ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::InitProc = $sym;
    };
    // the host's operator code is re-tagged, not translated
    (RichCmpFunc, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       obj: *mut $crate::host::Object,
                                       op: $crate::__private::c_int) -> *mut $crate::host::Object {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsRichCmp { arg0: self_, arg1: obj,
                                            arg2: $crate::args::RichCmpOp::from_host(op),
                                            ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::RichCmpFunc = $sym;
    };
    (GetBufferProc, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       view: *mut $crate::host::Buffer,
                                       flags: $crate::__private::c_int) -> $crate::__private::c_int {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsGetBuffer { self_: self_, view: view, flags: flags,
                                              ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::GetBufferProc = $sym;
    };
    (ReleaseBufferProc, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       view: *mut $crate::host::Buffer) {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsReleaseBuffer { self_: self_, view: view })
        }
        const _: $crate::host::ReleaseBufferProc = $sym;
    };
    (TraverseProc, $vis:vis $sym:ident, $imp:expr) => {
        $vis unsafe extern "C" fn $sym(self_: *mut $crate::host::Object,
                                       visit: $crate::host::VisitProc,
                                       arg: *mut $crate::__private::c_void) -> $crate::__private::c_int {
            $crate::dispatch::forward(
                $crate::dispatch::ImplHandle::new($imp as *const $crate::__private::c_void),
                $crate::args::ArgsTraverse { self_: self_, visit: visit, arg: arg,
                                             ..$crate::__private::Zeroable::zeroed() })
        }
        const _: $crate::host::TraverseProc = $sym;
    };
    // The host has no slot for destroy; the runtime calls the portable
    // destroy function from its own dealloc path. This exists only so the
    // registration tables have something of the right shape to point at.
    (DestroyFunc, $vis:vis $sym:ident, $imp:expr) => {
        $vis extern "C" fn $sym() {
            $crate::dispatch::unreachable_slot()
        }
        const _: $crate::host::DestroyPlaceholder = $sym;
    };
}

/// A generated trampoline, tagged with the host slot type it fits.
/// This is what the registration machinery consumes.
#[derive(Clone, Copy)]
pub enum NativeSlot {
    NoArgs(host::NoArgsFunc),
    O(host::OFunc),
    VarArgs(host::VarArgsFunc),
    Keywords(host::KeywordsFunc),
    InitProc(host::InitProc),
    RichCmpFunc(host::RichCmpFunc),
    GetBufferProc(host::GetBufferProc),
    ReleaseBufferProc(host::ReleaseBufferProc),
    TraverseProc(host::TraverseProc),
    /// Never to be installed into a live slot.
    DestroyFunc(host::DestroyPlaceholder),
}

impl NativeSlot {
    pub fn kind(&self) -> CallKind {
        match *self {
            NativeSlot::NoArgs(_) => CallKind::NoArgs,
            NativeSlot::O(_) => CallKind::O,
            NativeSlot::VarArgs(_) => CallKind::VarArgs,
            NativeSlot::Keywords(_) => CallKind::Keywords,
            NativeSlot::InitProc(_) => CallKind::InitProc,
            NativeSlot::RichCmpFunc(_) => CallKind::RichCmpFunc,
            NativeSlot::GetBufferProc(_) => CallKind::GetBufferProc,
            NativeSlot::ReleaseBufferProc(_) => CallKind::ReleaseBufferProc,
            NativeSlot::TraverseProc(_) => CallKind::TraverseProc,
            NativeSlot::DestroyFunc(_) => CallKind::DestroyFunc,
        }
    }

    pub fn is_installable(&self) -> bool {
        self.kind().has_native_counterpart()
    }

    fn raw(&self) -> *const c_void {
        match *self {
            NativeSlot::NoArgs(f) => f as *const c_void,
            NativeSlot::O(f) => f as *const c_void,
            NativeSlot::VarArgs(f) => f as *const c_void,
            NativeSlot::Keywords(f) => f as *const c_void,
            NativeSlot::InitProc(f) => f as *const c_void,
            NativeSlot::RichCmpFunc(f) => f as *const c_void,
            NativeSlot::GetBufferProc(f) => f as *const c_void,
            NativeSlot::ReleaseBufferProc(f) => f as *const c_void,
            NativeSlot::TraverseProc(f) => f as *const c_void,
            NativeSlot::DestroyFunc(f) => f as *const c_void,
        }
    }

    /// Address to store into the host's type slot.
    pub fn address(&self) -> Result<*const c_void, TrampolineError> {
        if !self.is_installable() {
            error!("refusing to hand out the {} placeholder for a host slot", self.kind());
            return Err(TrampolineError::NotInstallable(self.kind()));
        }
        Ok(self.raw())
    }
}

impl Debug for NativeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeSlot {{ kind: {}, fn: {:p} }}", self.kind(), self.raw())
    }
}
