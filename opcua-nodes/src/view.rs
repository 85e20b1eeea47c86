// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `View` and `ViewBuilder`.

use opcua_types::{LocalizedText, NodeClass, NodeId, QualifiedName};

use super::{base::Base, node::NodeBase};
use crate::{node_base_impl, node_builder_impl, node_builder_impl_component_of};

node_builder_impl!(ViewBuilder, View);
node_builder_impl_component_of!(ViewBuilder);

impl ViewBuilder {
    /// Set whether the view contains no loops.
    pub fn contains_no_loops(mut self, contains_no_loops: bool) -> Self {
        self.node.set_contains_no_loops(contains_no_loops);
        self
    }
}

/// A `View` is a node within the address space defining a pre-selected
/// subset of the address space for clients to browse.
#[derive(Debug)]
pub struct View {
    pub(super) base: Base,
    pub(super) contains_no_loops: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::View, &NodeId::null(), "", ""),
            contains_no_loops: true,
        }
    }
}

node_base_impl!(View);

impl View {
    /// Create a new view.
    pub fn new(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
        contains_no_loops: bool,
    ) -> View {
        View {
            base: Base::new(NodeClass::View, node_id, browse_name, display_name),
            contains_no_loops,
        }
    }

    /// Check whether this node is valid.
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }

    /// Get the `ContainsNoLoops` attribute of this view.
    pub fn contains_no_loops(&self) -> bool {
        self.contains_no_loops
    }

    /// Set the `ContainsNoLoops` attribute on this view.
    pub fn set_contains_no_loops(&mut self, contains_no_loops: bool) {
        self.contains_no_loops = contains_no_loops
    }
}
