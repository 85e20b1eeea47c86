// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `ObjectType` and `ObjectTypeBuilder`.

use opcua_types::{LocalizedText, NodeClass, NodeId, QualifiedName};

use super::{base::Base, node::NodeBase};
use crate::{node_base_impl, node_builder_impl, node_builder_impl_subtype};

node_builder_impl!(ObjectTypeBuilder, ObjectType);
node_builder_impl_subtype!(ObjectTypeBuilder);

impl ObjectTypeBuilder {
    /// Set whether the object type is abstract.
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.node.set_is_abstract(is_abstract);
        self
    }
}

/// An `ObjectType` is a node within the address space describing the type
/// of an Object instance (`FolderType`, `BaseObjectType`, ...).
#[derive(Debug)]
pub struct ObjectType {
    pub(super) base: Base,
    pub(super) is_abstract: bool,
}

impl Default for ObjectType {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::ObjectType, &NodeId::null(), "", ""),
            is_abstract: false,
        }
    }
}

node_base_impl!(ObjectType);

impl ObjectType {
    /// Create a new object type.
    pub fn new(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
        is_abstract: bool,
    ) -> ObjectType {
        ObjectType {
            base: Base::new(NodeClass::ObjectType, node_id, browse_name, display_name),
            is_abstract,
        }
    }

    /// Get whether this object type is valid.
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }

    /// Get the `IsAbstract` attribute for this object type.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Set the `IsAbstract` attribute for this object type.
    pub fn set_is_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }
}
