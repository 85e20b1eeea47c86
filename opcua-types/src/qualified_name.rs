// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `QualifiedName`.

use std::fmt;

/// A name qualified by the namespace it belongs to, used for `BrowseName`.
#[derive(PartialEq, Eq, Clone, Debug, Hash, Default)]
pub struct QualifiedName {
    /// Index of the namespace that owns this name.
    pub namespace_index: u16,
    /// The name itself.
    pub name: String,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "{}:{}", self.namespace_index, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl QualifiedName {
    /// Construct a qualified name in the given namespace.
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// Construct a qualified name in namespace 0.
    pub fn null() -> Self {
        Self::default()
    }

    /// True if the name is empty, regardless of namespace.
    pub fn is_null(&self) -> bool {
        self.name.is_empty()
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        QualifiedName::new(0, name)
    }
}
