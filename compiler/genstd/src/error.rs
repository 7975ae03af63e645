//! Errors of a whole link run.

use std::fmt;

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_link::LinkError;

use crate::walk::WalkError;

/// Anything that stops `genstd link`.
#[derive(Debug)]
pub enum Error {
    Walk(WalkError),
    Link(LinkError),
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Walk(err) => err.code(),
            Error::Link(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Walk(err) => err.to_diagnostic(),
            Error::Link(err) => err.to_diagnostic(),
        }
    }
}

impl From<WalkError> for Error {
    fn from(err: WalkError) -> Self {
        Error::Walk(err)
    }
}

impl From<LinkError> for Error {
    fn from(err: LinkError) -> Self {
        Error::Link(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Walk(err) => write!(f, "{err}"),
            Error::Link(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Walk(err) => Some(err),
            Error::Link(err) => Some(err),
        }
    }
}
