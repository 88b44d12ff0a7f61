//! The host side of the boundary: the types the host runtime hands to a
//! slot and the exact function-pointer type it expects in each slot.
//!
//! Nothing here is ever dereferenced by this crate. Objects and buffer
//! views are forwarded as raw pointers.

use libc::{c_int, c_void};

/// Host object. Opaque, only ever seen behind a pointer.
#[repr(C)]
pub struct Object {
    _private: [u8; 0],
}

/// Host buffer view, as filled in by a getbufferproc.
#[repr(C)]
pub struct Buffer {
    _private: [u8; 0],
}

/// Visitor handed to a traverseproc by the host's collector.
pub type VisitProc = Option<unsafe extern "C" fn(*mut Object, *mut c_void) -> c_int>;

// receiver, ignored (always null)
pub type NoArgsFunc = unsafe extern "C" fn(*mut Object, *mut Object) -> *mut Object;
// receiver, argument
pub type OFunc = unsafe extern "C" fn(*mut Object, *mut Object) -> *mut Object;
// receiver, positional bundle
pub type VarArgsFunc = unsafe extern "C" fn(*mut Object, *mut Object) -> *mut Object;
// receiver, positional bundle, keyword bundle
pub type KeywordsFunc = unsafe extern "C" fn(*mut Object, *mut Object, *mut Object) -> *mut Object;
pub type InitProc = unsafe extern "C" fn(*mut Object, *mut Object, *mut Object) -> c_int;
pub type RichCmpFunc = unsafe extern "C" fn(*mut Object, *mut Object, c_int) -> *mut Object;
pub type GetBufferProc = unsafe extern "C" fn(*mut Object, *mut Buffer, c_int) -> c_int;
pub type ReleaseBufferProc = unsafe extern "C" fn(*mut Object, *mut Buffer);
pub type TraverseProc = unsafe extern "C" fn(*mut Object, VisitProc, *mut c_void) -> c_int;

/// Shape of the destroy placeholder. The host has no slot of this type;
/// see [`NativeSlot::DestroyFunc`](../trampoline/enum.NativeSlot.html).
pub type DestroyPlaceholder = unsafe extern "C" fn();
