//! Error types of the datum runtime.
//!
//! Misusing a datum (asking a list for its characters, reading past the end of an array, taking
//! the first element of an empty word, ...) is a defect of the interpreter, not of the Logo
//! program being run. The asserting operations of this crate thus panic with one of the errors
//! below, while their `try_` counterparts hand the same error back to the caller. Errors that the
//! Logo programmer should see are datums themselves (see [crate::datum::ErrorBody]).

use crate::datum::DatumTag;

/// A mismatch between the tag of a datum and the tag expected by a typed accessor.
#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq)]
#[error("expected a {expected} datum, found a {found}")]
pub struct TagMismatchError {
    pub expected: DatumTag,
    pub found: DatumTag,
}

#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum DatumError {
    #[error(transparent)]
    TagMismatch(#[from] TagMismatchError),
    #[error("index {index} is out of range for a {tag} of size {size}")]
    IndexOutOfRange {
        tag: DatumTag,
        index: i64,
        size: usize,
    },
    #[error("`{op}` requires a non-empty {tag}")]
    Empty { op: &'static str, tag: DatumTag },
    #[error("`{op}` is not supported by {tag} datums")]
    Unsupported { op: &'static str, tag: DatumTag },
    #[error("cannot append to a list whose cells are shared with another list")]
    SharedList,
}

pub type Result<T, E = DatumError> = std::result::Result<T, E>;

/// Aborts the current operation on a contract violation.
#[track_caller]
#[cold]
pub(crate) fn violation(err: impl Into<DatumError>) -> ! {
    panic!("datum contract violation: {}", err.into())
}

/// Unwraps the result of a checked operation, turning an error into a contract violation.
pub(crate) trait OrViolation<T> {
    fn or_violation(self) -> T;
}

impl<T, E: Into<DatumError>> OrViolation<T> for std::result::Result<T, E> {
    #[track_caller]
    fn or_violation(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => violation(err),
        }
    }
}
