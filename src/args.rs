//! Packed argument records.
//!
//! One `#[repr(C)]` record per call kind: the logical arguments taken from
//! the host's native parameters, followed by a single `result` field typed
//! for what the host slot returns. A trampoline builds its record on the
//! stack, hands its address to the dispatcher and reads `result` back.
//! Field order is part of the contract with the portable implementation.

use std::alloc::Layout;
use std::cmp::Ordering;

use bytemuck::Zeroable;
use enumflags2::{bitflags, BitFlags};
use libc::{c_int, c_void};
use num_traits::FromPrimitive;

use catalog::CallKind;
use consts;
use error::TrampolineError;
use host::{Buffer, Object, VisitProc};

/// Implemented by every packed record.
///
/// `unpack` is the tail of a trampoline: it hands the result field back in
/// the form the host slot returns. Failure values (null handles, negative
/// statuses) pass through untouched.
pub trait PackedArgs: Zeroable {
    const KIND: CallKind;
    type Output;

    fn unpack(self) -> Self::Output;
}

/// Comparison operator as the portable ABI sees it.
///
/// The host passes its operator as a bare `c_int`; the trampoline wraps it
/// without translating, which is only sound because the two encodings
/// coincide (checked below at compile time). Codes outside the six known
/// operators are carried through as-is.
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct RichCmpOp(pub c_int);

impl RichCmpOp {
    pub const LT: RichCmpOp = RichCmpOp(0);
    pub const LE: RichCmpOp = RichCmpOp(1);
    pub const EQ: RichCmpOp = RichCmpOp(2);
    pub const NE: RichCmpOp = RichCmpOp(3);
    pub const GT: RichCmpOp = RichCmpOp(4);
    pub const GE: RichCmpOp = RichCmpOp(5);

    #[inline(always)]
    pub fn from_host(op: c_int) -> RichCmpOp {
        RichCmpOp(op)
    }

    pub fn comparison(self) -> Option<Comparison> {
        Comparison::from_i32(self.0)
    }
}

const _: () = assert!(RichCmpOp::LT.0 == consts::HOST_LT);
const _: () = assert!(RichCmpOp::LE.0 == consts::HOST_LE);
const _: () = assert!(RichCmpOp::EQ.0 == consts::HOST_EQ);
const _: () = assert!(RichCmpOp::NE.0 == consts::HOST_NE);
const _: () = assert!(RichCmpOp::GT.0 == consts::HOST_GT);
const _: () = assert!(RichCmpOp::GE.0 == consts::HOST_GE);

/// The six relational operators, for implementations that want to match.
#[repr(i32)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Primitive)]
pub enum Comparison {
    Lt = 0,
    Le = 1,
    Eq = 2,
    Ne = 3,
    Gt = 4,
    Ge = 5,
}

impl Comparison {
    pub fn op(self) -> RichCmpOp {
        RichCmpOp(self as c_int)
    }

    /// Whether `lhs <op> rhs` holds, given `lhs.cmp(rhs)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Lt => ordering == Ordering::Less,
            Comparison::Le => ordering != Ordering::Greater,
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::Ne => ordering != Ordering::Equal,
            Comparison::Gt => ordering == Ordering::Greater,
            Comparison::Ge => ordering != Ordering::Less,
        }
    }
}

/// Single bits of a getbufferproc request. Composite requests such as
/// `consts::BUF_STRIDES` decode into several of these.
#[bitflags]
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BufferRequest {
    Writable = 0x0001,
    Format = 0x0004,
    Nd = 0x0008,
    Strides = 0x0010,
    CContiguous = 0x0020,
    FContiguous = 0x0040,
    AnyContiguous = 0x0080,
    Indirect = 0x0100,
}

//<editor-fold desc="records">

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsNoArgs {
    pub self_: *mut Object,
    pub result: *mut Object,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsO {
    pub self_: *mut Object,
    pub arg: *mut Object,
    pub result: *mut Object,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsVarArgs {
    pub self_: *mut Object,
    pub args: *mut Object,
    pub result: *mut Object,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsKeywords {
    pub self_: *mut Object,
    pub args: *mut Object,
    pub kw: *mut Object,
    pub result: *mut Object,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsInitProc {
    pub self_: *mut Object,
    pub args: *mut Object,
    pub kw: *mut Object,
    pub result: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsRichCmp {
    pub arg0: *mut Object,
    pub arg1: *mut Object,
    pub arg2: RichCmpOp,
    pub result: *mut Object,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsGetBuffer {
    pub self_: *mut Object,
    pub view: *mut Buffer,
    pub flags: c_int,
    pub result: c_int,
}

impl ArgsGetBuffer {
    pub fn request(&self) -> BitFlags<BufferRequest> {
        BitFlags::from_bits_truncate(self.flags as u32)
    }
}

// no result: the host slot returns nothing
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArgsReleaseBuffer {
    pub self_: *mut Object,
    pub view: *mut Buffer,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct ArgsTraverse {
    pub self_: *mut Object,
    pub visit: VisitProc,
    pub arg: *mut c_void,
    pub result: c_int,
}

impl ::std::fmt::Debug for ArgsTraverse {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "ArgsTraverse {{ self_: {:p}, visit: {:?}, arg: {:p}, result: {} }}",
               self.self_, self.visit.map(|v| v as *const c_void), self.arg, self.result)
    }
}

//</editor-fold>

// Every field is a raw pointer, a c_int, or an Option of a fn pointer, all
// of which are valid when zeroed.
unsafe impl Zeroable for ArgsNoArgs {}
unsafe impl Zeroable for ArgsO {}
unsafe impl Zeroable for ArgsVarArgs {}
unsafe impl Zeroable for ArgsKeywords {}
unsafe impl Zeroable for ArgsInitProc {}
unsafe impl Zeroable for ArgsRichCmp {}
unsafe impl Zeroable for ArgsGetBuffer {}
unsafe impl Zeroable for ArgsReleaseBuffer {}
unsafe impl Zeroable for ArgsTraverse {}

macro_rules! packed_args {
    ($record:ty, $kind:ident, $output:ty) => {
        impl PackedArgs for $record {
            const KIND: CallKind = CallKind::$kind;
            type Output = $output;

            #[inline(always)]
            fn unpack(self) -> $output {
                self.result
            }
        }
    };
}

packed_args!(ArgsNoArgs, NoArgs, *mut Object);
packed_args!(ArgsO, O, *mut Object);
packed_args!(ArgsVarArgs, VarArgs, *mut Object);
packed_args!(ArgsKeywords, Keywords, *mut Object);
packed_args!(ArgsInitProc, InitProc, c_int);
packed_args!(ArgsRichCmp, RichCmpFunc, *mut Object);
packed_args!(ArgsGetBuffer, GetBufferProc, c_int);
packed_args!(ArgsTraverse, TraverseProc, c_int);

impl PackedArgs for ArgsReleaseBuffer {
    const KIND: CallKind = CallKind::ReleaseBufferProc;
    type Output = ();

    #[inline(always)]
    fn unpack(self) {}
}

/// Memory layout of the record a trampoline of `kind` passes to the
/// dispatcher. `None` for the destroy placeholder, which never builds one.
pub fn record_layout(kind: CallKind) -> Option<Layout> {
    match kind {
        CallKind::NoArgs => Some(Layout::new::<ArgsNoArgs>()),
        CallKind::O => Some(Layout::new::<ArgsO>()),
        CallKind::VarArgs => Some(Layout::new::<ArgsVarArgs>()),
        CallKind::Keywords => Some(Layout::new::<ArgsKeywords>()),
        CallKind::InitProc => Some(Layout::new::<ArgsInitProc>()),
        CallKind::RichCmpFunc => Some(Layout::new::<ArgsRichCmp>()),
        CallKind::GetBufferProc => Some(Layout::new::<ArgsGetBuffer>()),
        CallKind::ReleaseBufferProc => Some(Layout::new::<ArgsReleaseBuffer>()),
        CallKind::TraverseProc => Some(Layout::new::<ArgsTraverse>()),
        CallKind::DestroyFunc => None,
    }
}

/// Typed view of a record, as seen from the dispatcher side.
#[derive(Debug)]
pub enum Record<'a> {
    NoArgs(&'a mut ArgsNoArgs),
    O(&'a mut ArgsO),
    VarArgs(&'a mut ArgsVarArgs),
    Keywords(&'a mut ArgsKeywords),
    InitProc(&'a mut ArgsInitProc),
    RichCmp(&'a mut ArgsRichCmp),
    GetBuffer(&'a mut ArgsGetBuffer),
    ReleaseBuffer(&'a mut ArgsReleaseBuffer),
    Traverse(&'a mut ArgsTraverse),
}

impl<'a> Record<'a> {
    /// # Safety
    /// `args` must be the record address a trampoline of `kind` passed to
    /// the dispatcher, and the view must not outlive that call.
    pub unsafe fn from_raw(kind: CallKind, args: *mut c_void) -> Result<Record<'a>, TrampolineError> {
        let record = match kind {
            CallKind::NoArgs => Record::NoArgs(&mut *(args as *mut ArgsNoArgs)),
            CallKind::O => Record::O(&mut *(args as *mut ArgsO)),
            CallKind::VarArgs => Record::VarArgs(&mut *(args as *mut ArgsVarArgs)),
            CallKind::Keywords => Record::Keywords(&mut *(args as *mut ArgsKeywords)),
            CallKind::InitProc => Record::InitProc(&mut *(args as *mut ArgsInitProc)),
            CallKind::RichCmpFunc => Record::RichCmp(&mut *(args as *mut ArgsRichCmp)),
            CallKind::GetBufferProc => Record::GetBuffer(&mut *(args as *mut ArgsGetBuffer)),
            CallKind::ReleaseBufferProc => Record::ReleaseBuffer(&mut *(args as *mut ArgsReleaseBuffer)),
            CallKind::TraverseProc => Record::Traverse(&mut *(args as *mut ArgsTraverse)),
            CallKind::DestroyFunc => return Err(TrampolineError::NoRecord(kind)),
        };
        Ok(record)
    }

    pub fn kind(&self) -> CallKind {
        match *self {
            Record::NoArgs(_) => CallKind::NoArgs,
            Record::O(_) => CallKind::O,
            Record::VarArgs(_) => CallKind::VarArgs,
            Record::Keywords(_) => CallKind::Keywords,
            Record::InitProc(_) => CallKind::InitProc,
            Record::RichCmp(_) => CallKind::RichCmpFunc,
            Record::GetBuffer(_) => CallKind::GetBufferProc,
            Record::ReleaseBuffer(_) => CallKind::ReleaseBufferProc,
            Record::Traverse(_) => CallKind::TraverseProc,
        }
    }

    /// Receiver of the call; the left operand for rich comparison.
    pub fn receiver(&self) -> *mut Object {
        match *self {
            Record::NoArgs(ref a) => a.self_,
            Record::O(ref a) => a.self_,
            Record::VarArgs(ref a) => a.self_,
            Record::Keywords(ref a) => a.self_,
            Record::InitProc(ref a) => a.self_,
            Record::RichCmp(ref a) => a.arg0,
            Record::GetBuffer(ref a) => a.self_,
            Record::ReleaseBuffer(ref a) => a.self_,
            Record::Traverse(ref a) => a.self_,
        }
    }
}
