// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! [`Base`], the set of attributes common to every node class.

use opcua_types::{LocalizedText, NodeClass, NodeId, QualifiedName};

/// Base node class contains the attributes that all other kinds of nodes need. Part 3, diagram B.4
#[derive(Debug, Clone)]
pub struct Base {
    node_id: NodeId,
    node_class: NodeClass,
    browse_name: QualifiedName,
    display_name: LocalizedText,
    description: Option<LocalizedText>,
    write_mask: Option<u32>,
    user_write_mask: Option<u32>,
}

impl Base {
    /// Create a new base node.
    pub fn new(
        node_class: NodeClass,
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
    ) -> Base {
        Base {
            node_id: node_id.clone(),
            node_class,
            browse_name: browse_name.into(),
            display_name: display_name.into(),
            description: None,
            write_mask: None,
            user_write_mask: None,
        }
    }

    /// True if the node id and browse name are both set to something other
    /// than their null values.
    pub fn is_valid(&self) -> bool {
        !self.node_id.is_null() && !self.browse_name.is_null()
    }

    /// The node class of this node.
    pub fn node_class(&self) -> NodeClass {
        self.node_class
    }

    /// The node id of this node.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Set the node id. Used only while a node is under construction by a
    /// builder; once inserted into the address space a node's id is fixed.
    pub fn set_node_id(&mut self, node_id: NodeId) {
        self.node_id = node_id;
    }

    /// The node's browse name, unique amongst its siblings.
    pub fn browse_name(&self) -> &QualifiedName {
        &self.browse_name
    }

    /// Set the browse name. Used only while a node is under construction.
    pub fn set_browse_name(&mut self, browse_name: impl Into<QualifiedName>) {
        self.browse_name = browse_name.into();
    }

    /// The human readable display name.
    pub fn display_name(&self) -> &LocalizedText {
        &self.display_name
    }

    /// Set the display name.
    pub fn set_display_name(&mut self, display_name: impl Into<LocalizedText>) {
        self.display_name = display_name.into();
    }

    /// The node's description, if any.
    pub fn description(&self) -> Option<&LocalizedText> {
        self.description.as_ref()
    }

    /// Set the description.
    pub fn set_description(&mut self, description: impl Into<LocalizedText>) {
        self.description = Some(description.into());
    }

    /// Raw write mask bits, if set.
    pub fn write_mask(&self) -> Option<u32> {
        self.write_mask
    }

    /// Set the raw write mask bits.
    pub fn set_write_mask(&mut self, write_mask: u32) {
        self.write_mask = Some(write_mask);
    }

    /// Raw user write mask bits, if set.
    pub fn user_write_mask(&self) -> Option<u32> {
        self.user_write_mask
    }

    /// Set the raw user write mask bits.
    pub fn set_user_write_mask(&mut self, user_write_mask: u32) {
        self.user_write_mask = Some(user_write_mask);
    }
}
