use std::env;
use std::process::{Command, Output};

use slot_trampolines::ctx;
use slot_trampolines::host::Object;
use support::{self, CHILD_ENV};

trampoline!(DestroyFunc, destroy_trampoline, support::scripted);
trampoline!(O, o_trampoline, support::scripted);

const RETURNED: &str = "trampoline returned";

fn run_child(test: &str) -> Output {
    let exe = env::current_exe().unwrap();
    Command::new(exe)
        .args(&[test, "--exact", "--ignored", "--nocapture", "--test-threads", "1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap()
}

#[cfg(unix)]
fn assert_aborted(output: &Output) {
    use std::os::unix::process::ExitStatusExt;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.signal(), Some(::libc::SIGABRT), "child output: {}", stdout);
    assert!(!stdout.contains(RETURNED), "child output: {}", stdout);
    assert!(!stdout.contains("dispatched"), "child output: {}", stdout);
}

#[test]
#[ignore]
fn destroy_child() {
    if env::var_os(CHILD_ENV).is_none() {
        return;
    }
    support::setup();
    destroy_trampoline();
    println!("{}", RETURNED);
}

#[test]
#[ignore]
fn unwired_child() {
    if env::var_os(CHILD_ENV).is_none() {
        return;
    }
    ctx::uninstall();
    unsafe { o_trampoline(1 as *mut Object, 2 as *mut Object) };
    println!("{}", RETURNED);
}

#[cfg(unix)]
#[test]
fn destroy_trampoline_aborts() {
    let output = run_child("fatal::destroy_child");
    assert_aborted(&output);
}

#[cfg(unix)]
#[test]
fn trampoline_without_context_aborts() {
    let output = run_child("fatal::unwired_child");
    assert_aborted(&output);
}
