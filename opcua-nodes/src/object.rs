// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Object` and `ObjectBuilder`.

use opcua_types::{LocalizedText, NodeClass, NodeId, QualifiedName};

use super::{base::Base, node::NodeBase};
use crate::{
    node_base_impl, node_builder_impl, node_builder_impl_component_of,
    node_builder_impl_property_of,
};

node_builder_impl!(ObjectBuilder, Object);
node_builder_impl_component_of!(ObjectBuilder);
node_builder_impl_property_of!(ObjectBuilder);

impl ObjectBuilder {
    /// Get whether this is building an object with `FolderType` as the
    /// type definition.
    pub fn is_folder(self) -> Self {
        self.has_type_definition(NodeId::new(0, opcua_types::identifiers::FOLDER_TYPE))
    }
}

/// An `Object` is a type of node within the address space: a general
/// structural node without special meaning of its own (a folder, the
/// `Server` object, a component grouping other nodes).
#[derive(Debug)]
pub struct Object {
    pub(super) base: Base,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::Object, &NodeId::null(), "", ""),
        }
    }
}

node_base_impl!(Object);

impl Object {
    /// Create a new object.
    pub fn new(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
    ) -> Object {
        Object {
            base: Base::new(NodeClass::Object, node_id, browse_name, display_name),
        }
    }

    /// Get whether this object is valid.
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
}
