// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use opcua_types::{LocalizedText, NodeClass, NodeId, QualifiedName};

use super::{DataType, Method, Object, ObjectType, ReferenceType, Variable, VariableType, View};

/// Enumerates the node classes this address space implements. Each variant
/// wraps the node-class-specific struct holding its attributes.
#[derive(Debug)]
pub enum NodeType {
    /// Objects are general structural nodes without special meaning.
    Object(Box<Object>),
    /// Object types define properties of object nodes.
    ObjectType(Box<ObjectType>),
    /// Reference types define properties of references.
    ReferenceType(Box<ReferenceType>),
    /// Variables are nodes with a current value.
    Variable(Box<Variable>),
    /// Variable types define properties of variable nodes.
    VariableType(Box<VariableType>),
    /// Views are pre-defined subsets of the address space.
    View(Box<View>),
    /// Data types define the different types used by variables.
    DataType(Box<DataType>),
    /// Methods are nodes that can be invoked with the `Call` service.
    Method(Box<Method>),
}

/// Trait for types that have a node ID.
pub trait HasNodeId {
    /// Get the node ID of this item.
    fn node_id(&self) -> &NodeId;
}

impl HasNodeId for NodeType {
    fn node_id(&self) -> &NodeId {
        self.as_node_base().node_id()
    }
}

impl NodeType {
    /// Get a reference to this as `dyn NodeBase`.
    pub fn as_node_base(&self) -> &dyn NodeBase {
        match self {
            NodeType::Object(value) => value.as_ref(),
            NodeType::ObjectType(value) => value.as_ref(),
            NodeType::ReferenceType(value) => value.as_ref(),
            NodeType::Variable(value) => value.as_ref(),
            NodeType::VariableType(value) => value.as_ref(),
            NodeType::View(value) => value.as_ref(),
            NodeType::DataType(value) => value.as_ref(),
            NodeType::Method(value) => value.as_ref(),
        }
    }

    /// Get a mutable reference to this as `dyn NodeBase`.
    pub fn as_mut_node_base(&mut self) -> &mut dyn NodeBase {
        match self {
            NodeType::Object(value) => value.as_mut(),
            NodeType::ObjectType(value) => value.as_mut(),
            NodeType::ReferenceType(value) => value.as_mut(),
            NodeType::Variable(value) => value.as_mut(),
            NodeType::VariableType(value) => value.as_mut(),
            NodeType::View(value) => value.as_mut(),
            NodeType::DataType(value) => value.as_mut(),
            NodeType::Method(value) => value.as_mut(),
        }
    }

    /// Returns the [`NodeClass`] of this `NodeType`.
    pub fn node_class(&self) -> NodeClass {
        match self {
            NodeType::Object(_) => NodeClass::Object,
            NodeType::ObjectType(_) => NodeClass::ObjectType,
            NodeType::ReferenceType(_) => NodeClass::ReferenceType,
            NodeType::Variable(_) => NodeClass::Variable,
            NodeType::VariableType(_) => NodeClass::VariableType,
            NodeType::View(_) => NodeClass::View,
            NodeType::DataType(_) => NodeClass::DataType,
            NodeType::Method(_) => NodeClass::Method,
        }
    }
}

/// Implemented by every node class for the attributes common to all nodes.
///
/// The teacher's generic `Node` trait additionally dispatched on
/// `AttributeId` so a single `get_attribute`/`set_attribute` pair could
/// service the Attribute read/write services. This crate implements none of
/// those services, so that dispatch layer is dropped; each node class
/// exposes its own typed accessors instead (see `Variable::value()`,
/// `ReferenceType::is_abstract()`, and so on).
pub trait NodeBase {
    /// Returns the node class - Object, ObjectType, Method, DataType, ReferenceType, Variable, VariableType or View
    fn node_class(&self) -> NodeClass;

    /// Returns the node's `NodeId`
    fn node_id(&self) -> &NodeId;

    /// Returns the node's browse name
    fn browse_name(&self) -> &QualifiedName;

    /// Returns the node's display name
    fn display_name(&self) -> &LocalizedText;

    /// Sets the node's display name
    fn set_display_name(&mut self, display_name: LocalizedText);

    /// Get the description of this node.
    fn description(&self) -> Option<&LocalizedText>;

    /// Set the description of this node.
    fn set_description(&mut self, description: LocalizedText);

    /// Get the write mask of this node.
    fn write_mask(&self) -> Option<u32>;

    /// Set the write mask of this node.
    fn set_write_mask(&mut self, write_mask: u32);

    /// Get the user write mask for this node.
    fn user_write_mask(&self) -> Option<u32>;

    /// Set the user write mask for this node.
    fn set_user_write_mask(&mut self, write_mask: u32);
}
