//! Trampolines that let portable, context-passing slot implementations sit
//! behind a host runtime's fixed native slot signatures.
//!
//! host slot call -> `trampoline!` function -> packed record ->
//! `dispatch::invoke` -> portable implementation -> record `result` ->
//! native return.

#[macro_use]
extern crate enum_primitive_derive;
#[macro_use]
extern crate tracing;
extern crate bytemuck;
extern crate enumflags2;
extern crate libc;
extern crate num_traits;
extern crate tracing_subscriber;

#[macro_use]
pub mod trampoline;
pub mod consts;
pub mod error;
pub mod catalog;
pub mod host;
pub mod args;
pub mod ctx;
pub mod dispatch;
pub mod logging;

pub use args::{PackedArgs, Record, RichCmpOp};
pub use catalog::{CallKind, CATALOG};
pub use ctx::Context;
pub use dispatch::{DispatchFn, ImplHandle};
pub use error::TrampolineError;
pub use trampoline::NativeSlot;

#[doc(hidden)]
pub mod __private {
    pub use bytemuck::Zeroable;
    pub use libc::{c_int, c_void};
}
