use libc::c_void;

use slot_trampolines::{CallKind, NativeSlot, TrampolineError};
use support;

trampoline!(VarArgs, pub varargs_trampoline, support::scripted);
trampoline!(GetBufferProc, getbuffer_trampoline, support::scripted);
trampoline!(DestroyFunc, destroy_placeholder, support::scripted);

#[test]
fn slot_address_is_the_trampoline() {
    let slot = NativeSlot::VarArgs(varargs_trampoline);
    assert_eq!(slot.kind(), CallKind::VarArgs);
    assert!(slot.is_installable());
    assert_eq!(slot.address(), Ok(varargs_trampoline as *const c_void));

    let slot = NativeSlot::GetBufferProc(getbuffer_trampoline);
    assert_eq!(slot.kind(), CallKind::GetBufferProc);
    assert_eq!(slot.address(), Ok(getbuffer_trampoline as *const c_void));
}

#[test]
fn destroy_placeholder_is_never_handed_out() {
    let slot = NativeSlot::DestroyFunc(destroy_placeholder);
    assert_eq!(slot.kind(), CallKind::DestroyFunc);
    assert!(!slot.is_installable());
    assert_eq!(slot.address(), Err(TrampolineError::NotInstallable(CallKind::DestroyFunc)));
    assert!(format!("{:?}", slot).contains("destroyfunc"));
}

#[test]
fn one_symbol_per_kind_and_implementation() {
    trampoline!(VarArgs, other_varargs_trampoline, support::silent);
    let a = NativeSlot::VarArgs(varargs_trampoline).address().unwrap();
    let b = NativeSlot::VarArgs(other_varargs_trampoline).address().unwrap();
    assert!(a != b);
}
