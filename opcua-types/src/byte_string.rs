// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `ByteString`.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

/// An opaque byte string. `None` and `Some(vec![])` are distinct, matching
/// the OPC UA distinction between a null and an empty `ByteString`.
#[derive(Eq, PartialEq, Clone, Hash, Default)]
pub struct ByteString {
    /// The underlying bytes, or `None` if null.
    pub value: Option<Vec<u8>>,
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({})", self.as_base64())
    }
}

impl From<&[u8]> for ByteString {
    fn from(value: &[u8]) -> Self {
        ByteString {
            value: Some(value.to_vec()),
        }
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(value: Vec<u8>) -> Self {
        ByteString { value: Some(value) }
    }
}

impl ByteString {
    /// The null ByteString.
    pub fn null() -> ByteString {
        ByteString { value: None }
    }

    /// True if this is the null ByteString.
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Length in bytes, or -1 for null per the OPC UA wire convention.
    pub fn len(&self) -> isize {
        self.value.as_ref().map(|v| v.len() as isize).unwrap_or(-1)
    }

    /// True if null or zero-length.
    pub fn is_empty(&self) -> bool {
        self.value.as_ref().map(|v| v.is_empty()).unwrap_or(true)
    }

    /// Encode to a base64 string.
    pub fn as_base64(&self) -> String {
        match &self.value {
            Some(v) => STANDARD.encode(v),
            None => String::new(),
        }
    }

    /// Decode from a base64 string.
    pub fn from_base64(s: &str) -> Option<ByteString> {
        STANDARD.decode(s).ok().map(ByteString::from)
    }

    /// Generate a random byte string of the given length, used for session
    /// authentication tokens and nonces.
    pub fn random(length: usize) -> ByteString {
        let uuid_bytes = (0..length.div_ceil(16))
            .flat_map(|_| *uuid::Uuid::new_v4().as_bytes())
            .take(length)
            .collect::<Vec<_>>();
        ByteString::from(uuid_bytes)
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        self.value.as_deref().unwrap_or(&[])
    }
}
