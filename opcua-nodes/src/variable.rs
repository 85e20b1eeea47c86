// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Variable` and `VariableBuilder`.

use std::fmt;
use std::sync::Arc;

use opcua_types::{DataValue, LocalizedText, NodeClass, NodeId, QualifiedName, StatusCode, Variant};

use super::{base::Base, node::NodeBase};
use crate::{
    node_base_impl, node_builder_impl, node_builder_impl_component_of,
    node_builder_impl_property_of,
};

node_builder_impl!(VariableBuilder, Variable);
node_builder_impl_component_of!(VariableBuilder);
node_builder_impl_property_of!(VariableBuilder);

impl VariableBuilder {
    /// Set the base data type of this variable (e.g. `Boolean`, `String`).
    pub fn data_type(mut self, data_type: impl Into<NodeId>) -> Self {
        self.node.set_data_type(data_type);
        self
    }

    /// Set a constant value for this variable.
    pub fn value(mut self, value: impl Into<Variant>) -> Self {
        self.node.set_value(value);
        self
    }

    /// Back this variable's `Value` attribute with a read callback instead
    /// of a constant, e.g. for `ServerStatus` or `CurrentTime`.
    pub fn value_getter(
        mut self,
        getter: impl Fn() -> DataValue + Send + Sync + 'static,
    ) -> Self {
        self.node.set_value_getter(getter);
        self
    }

    /// Set the array dimensions of this variable.
    pub fn array_dimensions(mut self, array_dimensions: &[u32]) -> Self {
        self.node.set_array_dimensions(array_dimensions);
        self
    }

    /// Set the value rank of this variable. `-1` means scalar, `1` means a
    /// one-dimensional array, and so on.
    pub fn value_rank(mut self, value_rank: i32) -> Self {
        self.node.set_value_rank(value_rank);
        self
    }
}

/// Where a Variable's current value comes from.
pub enum ValueSource {
    /// A value set directly and read back unchanged.
    Static(DataValue),
    /// A value computed on every read, used for server-maintained
    /// variables such as `ServerStatus` or `CurrentTime`.
    Callback(Arc<dyn Fn() -> DataValue + Send + Sync>),
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Static(v) => f.debug_tuple("Static").field(v).finish(),
            ValueSource::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A `Variable` is a node within the address space holding a current value
/// of some `DataType`.
#[derive(Debug)]
pub struct Variable {
    pub(super) base: Base,
    pub(super) data_type: NodeId,
    pub(super) value_rank: i32,
    pub(super) value: Option<ValueSource>,
    pub(super) array_dimensions: Option<Vec<u32>>,
}

impl Default for Variable {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::Variable, &NodeId::null(), "", ""),
            data_type: NodeId::null(),
            value_rank: -1,
            value: None,
            array_dimensions: None,
        }
    }
}

node_base_impl!(Variable);

impl Variable {
    /// Create a new variable with a constant initial value.
    pub fn new(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
        data_type: impl Into<NodeId>,
        value: impl Into<Variant>,
    ) -> Variable {
        Variable {
            base: Base::new(NodeClass::Variable, node_id, browse_name, display_name),
            data_type: data_type.into(),
            value_rank: -1,
            value: Some(ValueSource::Static(DataValue::new_now(value))),
            array_dimensions: None,
        }
    }

    /// Get whether this variable is valid.
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }

    /// Get the data type of this variable.
    pub fn data_type(&self) -> &NodeId {
        &self.data_type
    }

    /// Set the data type of this variable.
    pub fn set_data_type(&mut self, data_type: impl Into<NodeId>) {
        self.data_type = data_type.into();
    }

    /// Get the value rank of this variable.
    pub fn value_rank(&self) -> i32 {
        self.value_rank
    }

    /// Set the value rank of this variable.
    pub fn set_value_rank(&mut self, value_rank: i32) {
        self.value_rank = value_rank;
    }

    /// Get the array dimensions of this variable.
    pub fn array_dimensions(&self) -> Option<&[u32]> {
        self.array_dimensions.as_deref()
    }

    /// Set the array dimensions of this variable.
    pub fn set_array_dimensions(&mut self, array_dimensions: &[u32]) {
        self.array_dimensions = Some(array_dimensions.to_vec());
    }

    /// Read the current value. Rejects any index range other than the
    /// default, since this crate does not implement the `NumericRange`
    /// sub-value addressing machinery of the Attribute service.
    pub fn value(&self, index_range_given: bool) -> Result<DataValue, StatusCode> {
        if index_range_given {
            return Err(StatusCode::BadIndexRangeInvalid);
        }
        match &self.value {
            Some(ValueSource::Static(v)) => Ok(v.clone()),
            Some(ValueSource::Callback(f)) => Ok(f()),
            None => Ok(DataValue::new_error(StatusCode::BadNotFound)),
        }
    }

    /// Set a constant value for this variable.
    pub fn set_value(&mut self, value: impl Into<Variant>) {
        self.value = Some(ValueSource::Static(DataValue::new_now(value)));
    }

    /// Set a full `DataValue`, preserving its timestamps and status.
    pub fn set_data_value(&mut self, value: DataValue) {
        self.value = Some(ValueSource::Static(value));
    }

    /// Back the value with a read callback.
    pub fn set_value_getter(&mut self, getter: impl Fn() -> DataValue + Send + Sync + 'static) {
        self.value = Some(ValueSource::Callback(Arc::new(getter)));
    }
}
