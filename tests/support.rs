use std::cell::{Cell, RefCell};
use std::env;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Once;

use libc::{c_int, c_void};

use slot_trampolines::args::*;
use slot_trampolines::ctx;
use slot_trampolines::logging;
use slot_trampolines::host::Object;
use slot_trampolines::{CallKind, Context, ImplHandle, Record};

/// Set in re-executed children; the dispatcher announces itself on stdout.
pub const CHILD_ENV: &str = "SLOT_TRAMPOLINES_TEST_CHILD";

/// Signature every test implementation handle points at.
pub type TestImpl = unsafe extern "C" fn(*mut Context, CallKind, *mut c_void);

#[derive(Debug, Clone, Copy)]
pub enum Snapshot {
    NoArgs(ArgsNoArgs),
    O(ArgsO),
    VarArgs(ArgsVarArgs),
    Keywords(ArgsKeywords),
    InitProc(ArgsInitProc),
    RichCmp(ArgsRichCmp),
    GetBuffer(ArgsGetBuffer),
    ReleaseBuffer(ArgsReleaseBuffer),
    Traverse(ArgsTraverse),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatched {
    pub ctx: *mut Context,
    pub kind: CallKind,
    pub implementation: ImplHandle,
}

thread_local! {
    static SEEN: RefCell<Vec<Snapshot>> = RefCell::new(Vec::new());
    static DISPATCHED: RefCell<Vec<Dispatched>> = RefCell::new(Vec::new());
    static REPLY: Cell<usize> = Cell::new(0);
}

static CONTEXT: AtomicPtr<Context> = AtomicPtr::new(0 as *mut Context);
static CONTEXT_INIT: Once = Once::new();

unsafe extern "C" fn test_dispatch(ctx: *mut Context, kind: CallKind, implementation: ImplHandle, args: *mut c_void) {
    if env::var_os(CHILD_ENV).is_some() {
        println!("dispatched {}", kind);
    }
    DISPATCHED.with(|d| d.borrow_mut().push(Dispatched { ctx, kind, implementation }));
    let f: TestImpl = ::std::mem::transmute(implementation.as_ptr());
    f(ctx, kind, args)
}

/// The context every test runs under. Installed for the calling thread
/// (or the process) on every call, which is a no-op after the first.
pub fn setup() -> *mut Context {
    CONTEXT_INIT.call_once(|| {
        logging::init();
        let ctx = Box::new(Context::new(b"test\0".as_ptr() as *const _, 1, test_dispatch));
        CONTEXT.store(Box::into_raw(ctx), Ordering::Release);
    });
    let ctx = CONTEXT.load(Ordering::Acquire);
    ctx::install(ctx).unwrap();
    ctx
}

pub fn reply_handle(value: usize) {
    REPLY.with(|r| r.set(value));
}

pub fn reply_status(status: c_int) {
    REPLY.with(|r| r.set(status as isize as usize));
}

pub fn take_seen() -> Vec<Snapshot> {
    SEEN.with(|s| ::std::mem::replace(&mut *s.borrow_mut(), Vec::new()))
}

pub fn take_last() -> Option<Snapshot> {
    take_seen().pop()
}

pub fn take_dispatched() -> Vec<Dispatched> {
    DISPATCHED.with(|d| ::std::mem::replace(&mut *d.borrow_mut(), Vec::new()))
}

pub fn handle_of(f: TestImpl) -> ImplHandle {
    ImplHandle::new(f as *const c_void)
}

pub fn snapshot(record: &Record) -> Snapshot {
    match *record {
        Record::NoArgs(ref a) => Snapshot::NoArgs(**a),
        Record::O(ref a) => Snapshot::O(**a),
        Record::VarArgs(ref a) => Snapshot::VarArgs(**a),
        Record::Keywords(ref a) => Snapshot::Keywords(**a),
        Record::InitProc(ref a) => Snapshot::InitProc(**a),
        Record::RichCmp(ref a) => Snapshot::RichCmp(**a),
        Record::GetBuffer(ref a) => Snapshot::GetBuffer(**a),
        Record::ReleaseBuffer(ref a) => Snapshot::ReleaseBuffer(**a),
        Record::Traverse(ref a) => Snapshot::Traverse(**a),
    }
}

/// Records what it was handed, then writes the scripted reply into the
/// result field.
pub unsafe extern "C" fn scripted(_ctx: *mut Context, kind: CallKind, args: *mut c_void) {
    let record = match Record::from_raw(kind, args) {
        Ok(record) => record,
        Err(_) => return,
    };
    SEEN.with(|s| s.borrow_mut().push(snapshot(&record)));
    let reply = REPLY.with(|r| r.get());
    let handle = reply as *mut Object;
    let status = reply as c_int;
    match record {
        Record::NoArgs(a) => a.result = handle,
        Record::O(a) => a.result = handle,
        Record::VarArgs(a) => a.result = handle,
        Record::Keywords(a) => a.result = handle,
        Record::InitProc(a) => a.result = status,
        Record::RichCmp(a) => a.result = handle,
        Record::GetBuffer(a) => a.result = status,
        Record::ReleaseBuffer(_) => {}
        Record::Traverse(a) => a.result = status,
    }
}

/// Leaves the record alone.
pub unsafe extern "C" fn silent(_ctx: *mut Context, _kind: CallKind, _args: *mut c_void) {}

pub fn null() -> *mut Object {
    ptr::null_mut()
}
