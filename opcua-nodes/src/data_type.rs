// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `DataType` and `DataTypeBuilder`.

use opcua_types::{LocalizedText, NodeClass, NodeId, QualifiedName};

use super::{base::Base, node::NodeBase};
use crate::{node_base_impl, node_builder_impl, node_builder_impl_subtype};

node_builder_impl!(DataTypeBuilder, DataType);
node_builder_impl_subtype!(DataTypeBuilder);

impl DataTypeBuilder {
    /// Set whether the data type is abstract, meaning it cannot be used
    /// directly by a Variable or VariableType node.
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.node.set_is_abstract(is_abstract);
        self
    }
}

/// A `DataType` is a node within the address space describing the type of
/// value a Variable or VariableType node may hold.
#[derive(Debug)]
pub struct DataType {
    pub(super) base: Base,
    pub(super) is_abstract: bool,
}

impl Default for DataType {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::DataType, &NodeId::null(), "", ""),
            is_abstract: false,
        }
    }
}

node_base_impl!(DataType);

impl DataType {
    /// Create a new data type.
    pub fn new(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
        is_abstract: bool,
    ) -> DataType {
        DataType {
            base: Base::new(NodeClass::DataType, node_id, browse_name, display_name),
            is_abstract,
        }
    }

    /// Get whether this data type is valid.
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }

    /// Get the `IsAbstract` attribute for this data type.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Set the `IsAbstract` attribute for this data type.
    pub fn set_is_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }
}
