// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Well-known namespace-0 numeric identifiers.
//!
//! These numbers come from the OPC UA Part 6 Annex A node set and must be
//! preserved verbatim: a server that invented its own numbering for these
//! nodes could not interoperate with a real client. Only the subset this
//! core's bootstrap and service layer actually reference is listed here.

/// Numeric identifier of a namespace-0 node, for use with
/// `NodeId::new(0, id)`.
pub type Id = u32;

// --- Reference types ---
pub const REFERENCES: Id = 31;
pub const HAS_SUBTYPE: Id = 45;
pub const HIERARCHICAL_REFERENCES: Id = 33;
pub const NON_HIERARCHICAL_REFERENCES: Id = 32;
pub const HAS_CHILD: Id = 34;
pub const ORGANIZES: Id = 35;
pub const HAS_EVENT_SOURCE: Id = 36;
pub const HAS_MODELLING_RULE: Id = 37;
pub const HAS_ENCODING: Id = 38;
pub const HAS_DESCRIPTION: Id = 39;
pub const HAS_TYPE_DEFINITION: Id = 40;
pub const GENERATES_EVENT: Id = 41;
pub const AGGREGATES: Id = 44;
pub const HAS_PROPERTY: Id = 46;
pub const HAS_COMPONENT: Id = 47;
pub const HAS_NOTIFIER: Id = 48;
pub const HAS_ORDERED_COMPONENT: Id = 49;

// --- Abstract / root types ---
pub const BASE_OBJECT_TYPE: Id = 58;
pub const BASE_VARIABLE_TYPE: Id = 62;
pub const BASE_DATA_VARIABLE_TYPE: Id = 63;
pub const BASE_DATA_TYPE: Id = 24;
pub const FOLDER_TYPE: Id = 61;

// --- Scalar data types ---
pub const BOOLEAN: Id = 1;
pub const SBYTE: Id = 2;
pub const BYTE: Id = 3;
pub const INT16: Id = 4;
pub const UINT16: Id = 5;
pub const INT32: Id = 6;
pub const UINT32: Id = 7;
pub const INT64: Id = 8;
pub const UINT64: Id = 9;
pub const FLOAT: Id = 10;
pub const DOUBLE: Id = 11;
pub const STRING: Id = 12;
pub const DATE_TIME: Id = 13;
pub const GUID: Id = 14;
pub const BYTE_STRING: Id = 15;
pub const LOCALIZED_TEXT: Id = 21;

// --- Root object hierarchy ---
pub const ROOT_FOLDER: Id = 84;
pub const OBJECTS_FOLDER: Id = 85;
pub const TYPES_FOLDER: Id = 86;
pub const VIEWS_FOLDER: Id = 87;

// --- Server object and status subtree ---
pub const SERVER: Id = 2253;
pub const SERVER_NAMESPACE_ARRAY: Id = 2255;
pub const SERVER_SERVER_STATUS: Id = 2256;
pub const SERVER_SERVER_STATUS_STATE: Id = 2259;
pub const SERVER_SERVER_STATUS_CURRENT_TIME: Id = 2258;
pub const SERVER_SERVER_CAPABILITIES: Id = 2268;
pub const SERVER_SERVER_CAPABILITIES_LOCALE_ID_ARRAY: Id = 2271;
pub const SERVER_SERVICE_LEVEL: Id = 2267;
pub const SERVER_SERVER_ARRAY: Id = 2254;
