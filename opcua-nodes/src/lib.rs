// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

#![warn(missing_docs)]

//! Node classes and reference storage for an OPC UA address space.
//!
//! This crate holds the data model only: the `AddressSpace` that owns these
//! nodes and enforces the add-node/bootstrap algorithm lives in
//! `opcua-server`.

mod base;
mod data_type;
mod method;
mod node;
mod object;
mod object_type;
mod reference_type;
mod references;
mod type_tree;
mod variable;
mod variable_type;
mod view;

pub use base::Base;
pub use data_type::{DataType, DataTypeBuilder};
pub use method::{Method, MethodBuilder};
pub use node::{HasNodeId, NodeBase, NodeType};
pub use object::{Object, ObjectBuilder};
pub use object_type::{ObjectType, ObjectTypeBuilder};
pub use reference_type::{ReferenceType, ReferenceTypeBuilder};
pub use references::{Reference, ReferenceDirection, References};
pub use type_tree::TypeTree;
pub use variable::{Variable, VariableBuilder, ValueSource};
pub use variable_type::{VariableType, VariableTypeBuilder};
pub use view::{View, ViewBuilder};

use opcua_types::NodeId;

/// Something a list of nodes (with optional references to other, already
/// inserted, nodes) can be inserted into. Implemented by `AddressSpace` in
/// the server crate; builders depend only on this trait so that node
/// construction and address-space storage stay decoupled.
pub trait NodeInsertTarget {
    /// Insert a node with a list of references into a target.
    fn insert<'a>(
        &mut self,
        node: impl Into<NodeType>,
        references: Option<&'a [(&'a NodeId, &'a NodeId, ReferenceDirection)]>,
    ) -> bool;
}

// A macro for creating builders. Builders provide a convenient, fluent way
// to construct a node together with the references it has to other nodes.
macro_rules! node_builder_impl {
    ( $node_builder_ty:ident, $node_ty:ident ) => {
        use opcua_types::{identifiers, LocalizedText, NodeId, QualifiedName};
        use $crate::ReferenceDirection;

        /// A builder for constructing a node of the same name, together
        /// with the references it should have to other nodes.
        pub struct $node_builder_ty {
            node: $node_ty,
            references: Vec<(NodeId, NodeId, ReferenceDirection)>,
        }

        impl $node_builder_ty {
            /// Create a builder for a node with the given id, browse name
            /// and display name.
            pub fn new<T, S>(node_id: &NodeId, browse_name: T, display_name: S) -> Self
            where
                T: Into<QualifiedName>,
                S: Into<LocalizedText>,
            {
                Self {
                    node: $node_ty::default(),
                    references: Vec::with_capacity(4),
                }
                .node_id(node_id.clone())
                .browse_name(browse_name)
                .display_name(display_name)
            }

            /// Get the node ID of the node being built.
            pub fn get_node_id(&self) -> &NodeId {
                self.node.node_id()
            }

            fn node_id(mut self, node_id: NodeId) -> Self {
                self.node.base.set_node_id(node_id);
                self
            }

            fn browse_name<V>(mut self, browse_name: V) -> Self
            where
                V: Into<QualifiedName>,
            {
                self.node.base.set_browse_name(browse_name.into());
                self
            }

            fn display_name<V>(mut self, display_name: V) -> Self
            where
                V: Into<LocalizedText>,
            {
                self.node.base.set_display_name(display_name.into());
                self
            }

            /// Tests that the builder is in a valid state to build or insert the node.
            pub fn is_valid(&self) -> bool {
                self.node.is_valid()
            }

            /// Sets the description of the node.
            pub fn description<V>(mut self, description: V) -> Self
            where
                V: Into<LocalizedText>,
            {
                self.node.base.set_description(description.into());
                self
            }

            /// Adds a reference from or to the node under construction.
            pub fn reference<T>(
                mut self,
                node_id: T,
                reference_type_id: impl Into<NodeId>,
                reference_direction: ReferenceDirection,
            ) -> Self
            where
                T: Into<NodeId>,
            {
                self.references
                    .push((node_id.into(), reference_type_id.into(), reference_direction));
                self
            }

            /// Add a `HasTypeDefinition` reference to the given type.
            pub fn has_type_definition<T>(self, type_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    type_id,
                    NodeId::new(0, identifiers::HAS_TYPE_DEFINITION),
                    ReferenceDirection::Forward,
                )
            }

            /// Indicates this node organizes another node by its id.
            pub fn organizes<T>(self, organizes_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    organizes_id,
                    NodeId::new(0, identifiers::ORGANIZES),
                    ReferenceDirection::Forward,
                )
            }

            /// Indicates this node is organized by another node by its id.
            pub fn organized_by<T>(self, organized_by_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    organized_by_id,
                    NodeId::new(0, identifiers::ORGANIZES),
                    ReferenceDirection::Inverse,
                )
            }

            /// Yields the built node, discarding any recorded references.
            /// Panics if the node is not valid.
            pub fn build(self) -> $node_ty {
                if self.is_valid() {
                    self.node
                } else {
                    panic!("node is not valid, node id = {:?}", self.node.node_id());
                }
            }

            /// Inserts the node into the address space, including
            /// references. Panics if the node is not valid.
            pub fn insert(self, target: &mut impl crate::NodeInsertTarget) -> bool {
                if !self.is_valid() {
                    panic!("node is not valid, node id = {:?}", self.node.node_id());
                }
                if self.references.is_empty() {
                    target.insert(self.node, None)
                } else {
                    let references = self
                        .references
                        .iter()
                        .map(|v| (&v.0, &v.1, v.2))
                        .collect::<Vec<_>>();
                    target.insert(self.node, Some(references.as_slice()))
                }
            }
        }
    };
}

macro_rules! node_builder_impl_subtype {
    ( $node_builder_ty:ident ) => {
        impl $node_builder_ty {
            /// Add an inverse `HasSubtype` reference to the given type.
            pub fn subtype_of<T>(self, type_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    type_id,
                    NodeId::new(0, identifiers::HAS_SUBTYPE),
                    ReferenceDirection::Inverse,
                )
            }

            /// Add a `HasSubtype` reference to the given type.
            pub fn has_subtype<T>(self, subtype_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    subtype_id,
                    NodeId::new(0, identifiers::HAS_SUBTYPE),
                    ReferenceDirection::Forward,
                )
            }
        }
    };
}

macro_rules! node_builder_impl_component_of {
    ( $node_builder_ty:ident ) => {
        impl $node_builder_ty {
            /// Add an inverse `HasComponent` reference to the given node.
            pub fn component_of<T>(self, component_of_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    component_of_id,
                    NodeId::new(0, identifiers::HAS_COMPONENT),
                    ReferenceDirection::Inverse,
                )
            }

            /// Add a `HasComponent` reference to the given node.
            pub fn has_component<T>(self, has_component_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    has_component_id,
                    NodeId::new(0, identifiers::HAS_COMPONENT),
                    ReferenceDirection::Forward,
                )
            }
        }
    };
}

macro_rules! node_builder_impl_property_of {
    ( $node_builder_ty:ident ) => {
        impl $node_builder_ty {
            /// Add a `HasProperty` reference to the given node.
            pub fn has_property<T>(self, has_property_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    has_property_id,
                    NodeId::new(0, identifiers::HAS_PROPERTY),
                    ReferenceDirection::Forward,
                )
            }

            /// Add an inverse `HasProperty` reference to the given node.
            pub fn property_of<T>(self, property_of_id: T) -> Self
            where
                T: Into<NodeId>,
            {
                self.reference(
                    property_of_id,
                    NodeId::new(0, identifiers::HAS_PROPERTY),
                    ReferenceDirection::Inverse,
                )
            }
        }
    };
}

/// Implements [`NodeBase`] for a node struct that holds its common
/// attributes in a `base: Base` field, and registers the `From` conversion
/// into [`NodeType`].
macro_rules! node_base_impl {
    ( $node_struct:ident ) => {
        impl From<$node_struct> for crate::NodeType {
            fn from(value: $node_struct) -> Self {
                Self::$node_struct(Box::new(value))
            }
        }

        impl crate::NodeBase for $node_struct {
            fn node_class(&self) -> opcua_types::NodeClass {
                self.base.node_class()
            }

            fn node_id(&self) -> &opcua_types::NodeId {
                self.base.node_id()
            }

            fn browse_name(&self) -> &opcua_types::QualifiedName {
                self.base.browse_name()
            }

            fn display_name(&self) -> &opcua_types::LocalizedText {
                self.base.display_name()
            }

            fn set_display_name(&mut self, display_name: opcua_types::LocalizedText) {
                self.base.set_display_name(display_name);
            }

            fn description(&self) -> Option<&opcua_types::LocalizedText> {
                self.base.description()
            }

            fn set_description(&mut self, description: opcua_types::LocalizedText) {
                self.base.set_description(description);
            }

            fn write_mask(&self) -> Option<u32> {
                self.base.write_mask()
            }

            fn set_write_mask(&mut self, write_mask: u32) {
                self.base.set_write_mask(write_mask);
            }

            fn user_write_mask(&self) -> Option<u32> {
                self.base.user_write_mask()
            }

            fn set_user_write_mask(&mut self, write_mask: u32) {
                self.base.set_user_write_mask(write_mask);
            }
        }
    };
}

pub(crate) use node_base_impl;
pub(crate) use node_builder_impl;
pub(crate) use node_builder_impl_component_of;
pub(crate) use node_builder_impl_property_of;
pub(crate) use node_builder_impl_subtype;
