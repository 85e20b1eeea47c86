// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

#![warn(missing_docs)]

//! Core OPC UA data types: identifiers, the built-in scalar types, and the
//! request/response message bodies consumed by the server core. Wire
//! encoding and JSON/XML import are handled by a separate codec layer and
//! are not part of this crate.

mod attribute;
mod byte_string;
mod errors;
mod expanded_node_id;
mod guid;
pub mod identifiers;
mod localized_text;
mod node_class;
mod node_id;
mod qualified_name;
mod service_types;
mod status_code;
mod variant;

pub use attribute::AttributeId;
pub use byte_string::ByteString;
pub use errors::Error;
pub use expanded_node_id::ExpandedNodeId;
pub use guid::Guid;
pub use localized_text::LocalizedText;
pub use node_class::NodeClass;
pub use node_id::{Identifier, NodeId, NodeIdError};
pub use qualified_name::QualifiedName;
pub use service_types::*;
pub use status_code::StatusCode;
pub use variant::{DataValue, Variant};

/// Convenience alias used throughout the service layer.
pub type Result<T> = std::result::Result<T, StatusCode>;
