// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `ExpandedNodeId`.

use std::fmt;

use crate::node_id::NodeId;

/// A `NodeId` that may additionally carry a namespace URI (instead of, or
/// in addition to, a namespace index) and a server index, for references
/// that point outside of the local server.
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct ExpandedNodeId {
    /// The local node id.
    pub node_id: NodeId,
    /// Namespace URI, if the reference target's namespace is identified by
    /// URI rather than by local index.
    pub namespace_uri: Option<String>,
    /// Index of the server holding the node, 0 for the local server.
    pub server_index: u32,
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.node_id)
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        ExpandedNodeId {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }
}

impl ExpandedNodeId {
    /// True if this points at a node on the local server (server_index 0
    /// and no namespace URI override).
    pub fn is_local(&self) -> bool {
        self.server_index == 0 && self.namespace_uri.is_none()
    }
}
