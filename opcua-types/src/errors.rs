// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Rust-level errors, distinct from the [`StatusCode`](crate::StatusCode)
//! values services return on the wire.

use std::fmt;

use crate::StatusCode;

/// A status code paired with a human-readable context message, used at
/// seams where a `StatusCode` alone would lose useful diagnostic detail.
#[derive(Debug, Clone)]
pub struct Error {
    code: StatusCode,
    message: String,
}

impl Error {
    /// Construct a new error from a status code and message.
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The status code this error carries.
    pub fn status_code(&self) -> StatusCode {
        self.code
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<Error> for StatusCode {
    fn from(e: Error) -> Self {
        e.code
    }
}

impl From<StatusCode> for Error {
    fn from(code: StatusCode) -> Self {
        Self {
            code,
            message: code.to_string(),
        }
    }
}
