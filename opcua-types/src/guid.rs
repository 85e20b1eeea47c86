// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Guid`.

use std::{fmt, str::FromStr};

use uuid::Uuid;

/// A 16-byte globally unique identifier, used as one of the `NodeId`
/// identifier kinds and for session / authentication token generation.
#[derive(Eq, PartialEq, Clone, Debug, Hash, Copy)]
pub struct Guid {
    uuid: Uuid,
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.uuid.hyphenated())
    }
}

impl FromStr for Guid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Guid {
            uuid: Uuid::parse_str(s)?,
        })
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::null()
    }
}

impl Guid {
    /// Create a new random v4 Guid.
    pub fn new() -> Guid {
        Guid {
            uuid: Uuid::new_v4(),
        }
    }

    /// The nil Guid, all bytes zero.
    pub fn null() -> Guid {
        Guid { uuid: Uuid::nil() }
    }

    /// True if this is the nil Guid.
    pub fn is_null(&self) -> bool {
        self.uuid.is_nil()
    }

    /// Raw 16-byte representation.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.uuid.as_bytes()
    }

    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Guid {
        Guid {
            uuid: Uuid::from_bytes(bytes),
        }
    }
}
