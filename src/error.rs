use std::error::Error;
use std::fmt::{Display, Formatter};

use catalog::CallKind;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TrampolineError {
    UnknownCallKind(u32),
    NoRecord(CallKind),
    NotInstallable(CallKind),
    NullContext,
}

impl Display for TrampolineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            TrampolineError::UnknownCallKind(raw) =>
                write!(f, "The tag {} does not name a known call kind", raw),
            TrampolineError::NoRecord(kind) =>
                write!(f, "Call kind {} has no packed argument record", kind),
            TrampolineError::NotInstallable(kind) =>
                write!(f, "The {} trampoline must not be installed into a host slot", kind),
            TrampolineError::NullContext => write!(f, "Refusing to install a null context"),
        }
    }
}

impl Error for TrampolineError {}
