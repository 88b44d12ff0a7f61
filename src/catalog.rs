//! The closed set of slot shapes the host can dispatch to.
//!
//! Each [`CallKind`] maps to exactly one host function-pointer type (see
//! [`host`](../host/index.html)) and one packed record (see
//! [`args`](../args/index.html)). The mapping is fixed at build time; the
//! static [`CATALOG`] describes it for the registration side.

use std::fmt::{Display, Formatter};

use num_traits::FromPrimitive;

use error::TrampolineError;

/// Tags agree with the portable ABI's signature enumeration. The gaps are
/// signature kinds that do not go through a trampoline.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Primitive)]
pub enum CallKind {
    VarArgs = 1,
    Keywords = 2,
    NoArgs = 3,
    O = 4,
    DestroyFunc = 5,
    GetBufferProc = 6,
    ReleaseBufferProc = 7,
    RichCmpFunc = 25,
    InitProc = 30,
    TraverseProc = 34,
}

/// One parameter of a host slot signature, named by its logical role.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NativeParam {
    Receiver,
    /// Present in the host signature, always null, not forwarded.
    Unused,
    Argument,
    ArgBundle,
    KwBundle,
    LeftOperand,
    RightOperand,
    CompareOp,
    BufferView,
    BufferFlags,
    Visitor,
    VisitorState,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ReturnShape {
    /// Object pointer; null signals a forwarded failure.
    Handle,
    /// `c_int` status; negative signals a forwarded failure.
    Status,
    Nothing,
    /// No host slot calls this shape at all.
    Unreachable,
}

#[derive(Debug)]
pub struct Signature {
    pub kind: CallKind,
    pub name: &'static str,
    pub params: &'static [NativeParam],
    pub ret: ReturnShape,
}

use self::NativeParam::*;

pub static CATALOG: [Signature; 10] = [
    Signature { kind: CallKind::VarArgs, name: "varargs",
                params: &[Receiver, ArgBundle], ret: ReturnShape::Handle },
    Signature { kind: CallKind::Keywords, name: "keywords",
                params: &[Receiver, ArgBundle, KwBundle], ret: ReturnShape::Handle },
    Signature { kind: CallKind::NoArgs, name: "noargs",
                params: &[Receiver, Unused], ret: ReturnShape::Handle },
    Signature { kind: CallKind::O, name: "o",
                params: &[Receiver, Argument], ret: ReturnShape::Handle },
    Signature { kind: CallKind::DestroyFunc, name: "destroyfunc",
                params: &[], ret: ReturnShape::Unreachable },
    Signature { kind: CallKind::GetBufferProc, name: "getbufferproc",
                params: &[Receiver, BufferView, BufferFlags], ret: ReturnShape::Status },
    Signature { kind: CallKind::ReleaseBufferProc, name: "releasebufferproc",
                params: &[Receiver, BufferView], ret: ReturnShape::Nothing },
    Signature { kind: CallKind::RichCmpFunc, name: "richcmpfunc",
                params: &[LeftOperand, RightOperand, CompareOp], ret: ReturnShape::Handle },
    Signature { kind: CallKind::InitProc, name: "initproc",
                params: &[Receiver, ArgBundle, KwBundle], ret: ReturnShape::Status },
    Signature { kind: CallKind::TraverseProc, name: "traverseproc",
                params: &[Receiver, Visitor, VisitorState], ret: ReturnShape::Status },
];

impl CallKind {
    pub const ALL: [CallKind; 10] = [
        CallKind::VarArgs,
        CallKind::Keywords,
        CallKind::NoArgs,
        CallKind::O,
        CallKind::DestroyFunc,
        CallKind::GetBufferProc,
        CallKind::ReleaseBufferProc,
        CallKind::RichCmpFunc,
        CallKind::InitProc,
        CallKind::TraverseProc,
    ];

    pub fn from_raw(raw: u32) -> Result<CallKind, TrampolineError> {
        CallKind::from_u32(raw).ok_or_else(|| {
            warn!("rejecting unknown call kind tag {}", raw);
            TrampolineError::UnknownCallKind(raw)
        })
    }

    pub fn signature(self) -> &'static Signature {
        let index = match self {
            CallKind::VarArgs => 0,
            CallKind::Keywords => 1,
            CallKind::NoArgs => 2,
            CallKind::O => 3,
            CallKind::DestroyFunc => 4,
            CallKind::GetBufferProc => 5,
            CallKind::ReleaseBufferProc => 6,
            CallKind::RichCmpFunc => 7,
            CallKind::InitProc => 8,
            CallKind::TraverseProc => 9,
        };
        &CATALOG[index]
    }

    pub fn name(self) -> &'static str {
        self.signature().name
    }

    /// False only for the destroy placeholder.
    pub fn has_native_counterpart(self) -> bool {
        self.signature().ret != ReturnShape::Unreachable
    }
}

impl Display for CallKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
