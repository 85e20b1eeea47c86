// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! The `NodeClass` of a node in the address space.

/// Distinguishes the eight kinds of node the address space can hold.
/// The discriminants match the OPC UA `NodeClass` bitmask values used
/// when filtering a node's attribute set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NodeClass {
    /// Unspecified, used only as a filter wildcard.
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

impl NodeClass {
    /// True for the three "instance" classes (Object, Variable, Method),
    /// as opposed to the type/meta classes.
    pub fn is_instance(&self) -> bool {
        matches!(self, NodeClass::Object | NodeClass::Variable | NodeClass::Method)
    }

    /// True for the four "type" classes.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            NodeClass::ObjectType
                | NodeClass::VariableType
                | NodeClass::ReferenceType
                | NodeClass::DataType
        )
    }
}
