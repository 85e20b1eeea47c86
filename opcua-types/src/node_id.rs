// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `NodeId`.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{byte_string::ByteString, guid::Guid, StatusCode};

/// The kind of identifier carried by a `NodeId`: numeric, string, guid or
/// opaque byte string.
#[derive(Eq, PartialEq, Clone, Debug, Hash)]
pub enum Identifier {
    /// Numeric node ID identifier. i=123
    Numeric(u32),
    /// String node ID identifier, s=...
    String(String),
    /// GUID node ID identifier, g=...
    Guid(Guid),
    /// Opaque node ID identifier, o=...
    ByteString(ByteString),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Identifier::Numeric(v) => write!(f, "i={v}"),
            Identifier::String(v) => write!(f, "s={v}"),
            Identifier::Guid(v) => write!(f, "g={v}"),
            Identifier::ByteString(v) => write!(f, "b={}", v.as_base64()),
        }
    }
}

impl From<u32> for Identifier {
    fn from(v: u32) -> Self {
        Identifier::Numeric(v)
    }
}

impl From<&str> for Identifier {
    fn from(v: &str) -> Self {
        Identifier::String(v.to_string())
    }
}

impl From<String> for Identifier {
    fn from(v: String) -> Self {
        Identifier::String(v)
    }
}

impl From<Guid> for Identifier {
    fn from(v: Guid) -> Self {
        Identifier::Guid(v)
    }
}

impl From<ByteString> for Identifier {
    fn from(v: ByteString) -> Self {
        Identifier::ByteString(v)
    }
}

/// An identifier for a node in the address space of an OPC UA server:
/// a namespace index paired with a numeric, string, guid or byte-string
/// identifier. Equality and hashing are structural (invariant I1).
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct NodeId {
    /// The index for a namespace.
    pub namespace: u16,
    /// The identifier for the node within that namespace.
    pub identifier: Identifier,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};{}", self.namespace, self.identifier)
        } else {
            write!(f, "{}", self.identifier)
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::null()
    }
}

impl FromStr for NodeId {
    type Err = StatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ns=<namespaceindex>;<type>=<value>, per Part 6 5.3.1.10. The ns=
        // prefix is omitted when namespace == 0.
        static RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^(ns=(?P<ns>[0-9]+);)?(?P<t>[isgb])=(?P<v>.+)$").unwrap());

        let captures = RE.captures(s).ok_or(StatusCode::BadNodeIdInvalid)?;
        let namespace = if let Some(ns) = captures.name("ns") {
            ns.as_str()
                .parse::<u16>()
                .map_err(|_| StatusCode::BadNodeIdInvalid)?
        } else {
            0
        };
        let value = captures.name("v").unwrap().as_str();
        let identifier = match captures.name("t").unwrap().as_str() {
            "i" => value
                .parse::<u32>()
                .map(Identifier::Numeric)
                .map_err(|_| StatusCode::BadNodeIdInvalid)?,
            "s" => Identifier::String(value.to_string()),
            "g" => Guid::from_str(value)
                .map(Identifier::Guid)
                .map_err(|_| StatusCode::BadNodeIdInvalid)?,
            "b" => ByteString::from_base64(value)
                .map(Identifier::ByteString)
                .ok_or(StatusCode::BadNodeIdInvalid)?,
            _ => return Err(StatusCode::BadNodeIdInvalid),
        };
        Ok(NodeId {
            namespace,
            identifier,
        })
    }
}

impl NodeId {
    /// Construct a new NodeId from anything that converts to an Identifier:
    /// a `u32`, [`Guid`], [`ByteString`] or string.
    pub fn new<T>(namespace: u16, value: T) -> NodeId
    where
        T: Into<Identifier>,
    {
        NodeId {
            namespace,
            identifier: value.into(),
        }
    }

    /// The sentinel null NodeId: namespace 0, numeric identifier 0.
    pub fn null() -> NodeId {
        NodeId::new(0, 0u32)
    }

    /// True if this is the null NodeId.
    pub fn is_null(&self) -> bool {
        self.namespace == 0 && matches!(self.identifier, Identifier::Numeric(0))
    }

    /// True if the identifier is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self.identifier, Identifier::Numeric(_))
    }

    /// Get the numeric value of this node ID if it is numeric.
    pub fn as_u32(&self) -> Option<u32> {
        match &self.identifier {
            Identifier::Numeric(i) => Some(*i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_node_id_is_null() {
        assert!(NodeId::null().is_null());
        assert!(!NodeId::new(0, 1u32).is_null());
        assert!(!NodeId::new(1, 0u32).is_null());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        let cases = [
            NodeId::new(0, 84u32),
            NodeId::new(2, "the.answer"),
            NodeId::new(1, Guid::new()),
        ];
        for id in cases {
            let s = id.to_string();
            let parsed: NodeId = s.parse().unwrap();
            assert_eq!(id, parsed, "round trip through {s}");
        }
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("not-a-node-id".parse::<NodeId>().is_err());
        assert!("ns=abc;i=1".parse::<NodeId>().is_err());
    }

    #[test]
    fn equality_is_structural_not_pointer() {
        let a = NodeId::new(1, "x");
        let b = NodeId::new(1, "x");
        assert_eq!(a, b);
        use hashbrown::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
