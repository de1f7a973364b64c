//! Error management module.
//!
//! Hand-rolled `Display` + `std::error::Error` impls in the teacher's own
//! style (`examples/tafia-quick-xml/src/error.rs`) rather than `thiserror` —
//! nothing in the teacher's dependency graph pulls that crate in, so this
//! one doesn't either.

use std::fmt;
use std::io;

/// The five reportable error kinds from spec §7 (kind 6, tolerated
/// malformations, is never surfaced — it's absorbed silently by the tree
/// construction engine).
#[derive(Debug)]
pub enum Error {
    /// Constructor misuse: a null/empty source where one is required.
    InvalidArgument(String),
    /// An attribute index passed to `get_attribute`/`move_to_attribute` is
    /// out of range for the current element.
    OutOfRange(String),
    /// The cursor was asked to do something that only makes sense from a
    /// different position (e.g. moving to an attribute while not positioned
    /// on an element or attribute).
    InvalidState(String),
    /// Entity resolution was requested; this reader doesn't do DTD-driven
    /// entity expansion.
    NotImplemented(&'static str),
    /// The inner read loop iterated past its safety cap without making
    /// progress (spec §4.7's iteration cap, §7 kind 5).
    MalformedInput(String),
    /// Propagated I/O failure from the underlying character source.
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::OutOfRange(msg) => write!(f, "index out of range: {msg}"),
            Error::InvalidState(msg) => write!(f, "invalid cursor state: {msg}"),
            Error::NotImplemented(what) => write!(f, "not implemented: {what}"),
            Error::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
