#[macro_use]
extern crate slot_trampolines;
extern crate proptest;
extern crate libc;

mod support;
mod slots;
mod fatal;
