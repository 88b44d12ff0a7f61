#![allow(dead_code)]

// numeric encodings the host uses on its side of the slot boundary.

use libc::c_int;

#[repr(i32)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Primitive)]
pub enum HostCompareOp {
    LT = 0,
    LE = 1,
    EQ = 2,
    NE = 3,
    GT = 4,
    GE = 5,
}

pub const HOST_LT: c_int = 0;
pub const HOST_LE: c_int = 1;
pub const HOST_EQ: c_int = 2;
pub const HOST_NE: c_int = 3;
pub const HOST_GT: c_int = 4;
pub const HOST_GE: c_int = 5;

// status codes for initproc, getbufferproc and traverseproc
pub const STATUS_OK: c_int = 0;
pub const STATUS_ERROR: c_int = -1;

// buffer request bits as the host passes them to getbufferproc.
// composite requests (STRIDES, C_CONTIGUOUS, ...) are unions of these.
pub const BUF_SIMPLE: c_int = 0;
pub const BUF_WRITABLE: c_int = 0x0001;
pub const BUF_FORMAT: c_int = 0x0004;
pub const BUF_ND: c_int = 0x0008;
pub const BUF_STRIDES: c_int = 0x0010 | BUF_ND;
pub const BUF_C_CONTIGUOUS: c_int = 0x0020 | BUF_STRIDES;
pub const BUF_F_CONTIGUOUS: c_int = 0x0040 | BUF_STRIDES;
pub const BUF_ANY_CONTIGUOUS: c_int = 0x0080 | BUF_STRIDES;
pub const BUF_INDIRECT: c_int = 0x0100 | BUF_STRIDES;
