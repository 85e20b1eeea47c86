// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Variant` and `DataValue`.

use chrono::{DateTime as ChronoDateTime, Utc};

use crate::{node_id::NodeId, ByteString, Guid, LocalizedText};

/// A dynamically typed scalar (or homogeneous array) value, used for the
/// `Value` attribute of Variable nodes and their read/write bodies.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Variant {
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(ChronoDateTime<Utc>),
    Guid(Guid),
    ByteString(ByteString),
    LocalizedText(LocalizedText),
    NodeId(Box<NodeId>),
    /// A homogeneous array. An empty array is distinct from `Empty`.
    Array(Vec<Variant>),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Empty
    }
}

impl Variant {
    /// True for the `Empty` variant (the Value attribute has never been
    /// set, or was explicitly cleared).
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// The `DataTypeId`-equivalent scalar type name, used to validate a
    /// node's declared `DataType` against the value actually stored.
    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Empty => "Empty",
            Variant::Boolean(_) => "Boolean",
            Variant::SByte(_) => "SByte",
            Variant::Byte(_) => "Byte",
            Variant::Int16(_) => "Int16",
            Variant::UInt16(_) => "UInt16",
            Variant::Int32(_) => "Int32",
            Variant::UInt32(_) => "UInt32",
            Variant::Int64(_) => "Int64",
            Variant::UInt64(_) => "UInt64",
            Variant::Float(_) => "Float",
            Variant::Double(_) => "Double",
            Variant::String(_) => "String",
            Variant::DateTime(_) => "DateTime",
            Variant::Guid(_) => "Guid",
            Variant::ByteString(_) => "ByteString",
            Variant::LocalizedText(_) => "LocalizedText",
            Variant::NodeId(_) => "NodeId",
            Variant::Array(items) => items.first().map(Variant::type_name).unwrap_or("Empty"),
        }
    }
}

macro_rules! from_variant {
    ($t:ty, $v:ident) => {
        impl From<$t> for Variant {
            fn from(v: $t) -> Self {
                Variant::$v(v.into())
            }
        }
    };
}

from_variant!(bool, Boolean);
from_variant!(i8, SByte);
from_variant!(u8, Byte);
from_variant!(i16, Int16);
from_variant!(u16, UInt16);
from_variant!(i32, Int32);
from_variant!(u32, UInt32);
from_variant!(i64, Int64);
from_variant!(u64, UInt64);
from_variant!(f32, Float);
from_variant!(f64, Double);
from_variant!(String, String);

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

/// A value paired with its source/server timestamps and a per-attribute
/// status code, as returned from a `Read` service call.
#[derive(Debug, Clone)]
pub struct DataValue {
    /// The value itself.
    pub value: Option<Variant>,
    /// Status of the read, separate from the overall service result.
    pub status: crate::StatusCode,
    /// When the value was last produced at the source.
    pub source_timestamp: Option<ChronoDateTime<Utc>>,
    /// When the server observed the value.
    pub server_timestamp: Option<ChronoDateTime<Utc>>,
}

impl DataValue {
    /// Construct a good DataValue with both timestamps set to now.
    pub fn new_now(value: impl Into<Variant>) -> Self {
        let now = Utc::now();
        Self {
            value: Some(value.into()),
            status: crate::StatusCode::Good,
            source_timestamp: Some(now),
            server_timestamp: Some(now),
        }
    }

    /// Construct a DataValue carrying only a (bad) status code, no value.
    pub fn new_error(status: crate::StatusCode) -> Self {
        Self {
            value: None,
            status,
            source_timestamp: None,
            server_timestamp: None,
        }
    }
}
