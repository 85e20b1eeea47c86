// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The address space: node storage, the standard-node bootstrap sequence,
//! and browse helpers.
//!
//! Bootstrap inserts type nodes (reference types, object/variable/data
//! types) before any instance that references them, so the one validation
//! [`NodeInsertTarget::insert`] performs — that an Object or Variable's
//! `HasTypeDefinition` target already exists and is of a compatible node
//! class — never has to be bypassed. There is no separate "seed" insert
//! path; getting the order right is enough.

use std::sync::Arc;

use hashbrown::HashMap;

use opcua_core::sync::RwLock;
use opcua_nodes::{
    HasNodeId, NodeBase, NodeInsertTarget, NodeType, ObjectBuilder, ObjectTypeBuilder, Reference,
    ReferenceDirection, ReferenceTypeBuilder, References, TypeTree, Variable, VariableBuilder,
};
use opcua_types::{identifiers, DataValue, NodeClass, NodeId, QualifiedName, Variant};

use crate::config::ServerConfig;
use crate::server_status::ServerStatusWrapper;

/// Owns every node and reference in the server, plus the derived type
/// hierarchy used to answer subtype queries during browse.
pub struct AddressSpace {
    nodes: HashMap<NodeId, NodeType>,
    references: References,
    type_tree: TypeTree,
    namespaces: Arc<RwLock<Vec<String>>>,
}

impl NodeInsertTarget for AddressSpace {
    fn insert<'a>(
        &mut self,
        node: impl Into<NodeType>,
        references: Option<&'a [(&'a NodeId, &'a NodeId, ReferenceDirection)]>,
    ) -> bool {
        let node = node.into();
        let node_id = node.node_id().clone();
        let node_class = node.node_class();

        if self.nodes.contains_key(&node_id) {
            return false;
        }

        if let Some(refs) = references {
            if matches!(node_class, NodeClass::Object | NodeClass::Variable) {
                let has_type_definition = refs.iter().find(|(_, rt, dir)| {
                    *dir == ReferenceDirection::Forward
                        && **rt == NodeId::new(0, identifiers::HAS_TYPE_DEFINITION)
                });
                match has_type_definition {
                    Some((type_id, _, _)) => {
                        let Some(type_node) = self.nodes.get(*type_id) else {
                            return false;
                        };
                        let compatible = matches!(
                            (node_class, type_node.node_class()),
                            (NodeClass::Object, NodeClass::ObjectType)
                                | (NodeClass::Variable, NodeClass::VariableType)
                        );
                        if !compatible {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
        }

        if let Some(refs) = references {
            for (target, reference_type, direction) in refs {
                self.references
                    .insert_reference(&node_id, target, (*reference_type).clone(), *direction);
                if **reference_type == NodeId::new(0, identifiers::HAS_SUBTYPE) {
                    match direction {
                        ReferenceDirection::Forward => {
                            self.type_tree.add_subtype(node_id.clone(), (*target).clone())
                        }
                        ReferenceDirection::Inverse => {
                            self.type_tree.add_subtype((*target).clone(), node_id.clone())
                        }
                    }
                }
            }
        }

        self.nodes.insert(node_id, node);
        true
    }
}

impl AddressSpace {
    /// Build the standard namespace-0 node set: the reference-type and
    /// base-type hierarchy, the Root/Objects/Types/Views folders, and the
    /// Server object with its NamespaceArray/ServerArray/ServerStatus/
    /// ServiceLevel variables wired to `status`.
    pub fn bootstrap(config: &ServerConfig, status: &ServerStatusWrapper) -> Self {
        let mut address_space = Self {
            nodes: HashMap::new(),
            references: References::new(),
            type_tree: TypeTree::new(),
            namespaces: Arc::new(RwLock::new(vec!["http://opcfoundation.org/UA/".to_string()])),
        };
        address_space.add_namespace(&config.application_uri);

        address_space.bootstrap_reference_types();
        address_space.bootstrap_base_types();
        address_space.bootstrap_folders();
        address_space.bootstrap_server_object(status);

        address_space
    }

    /// Register a namespace URI, returning its index. The index is stable
    /// for the lifetime of the process; real persistence across restarts is
    /// out of scope.
    pub fn add_namespace(&mut self, uri: &str) -> u16 {
        let mut namespaces = self.namespaces.write();
        if let Some(i) = namespaces.iter().position(|n| n == uri) {
            return i as u16;
        }
        namespaces.push(uri.to_string());
        (namespaces.len() - 1) as u16
    }

    /// The current NamespaceArray, index 0 always being the standard
    /// OPC UA namespace.
    pub fn namespace_array(&self) -> Vec<String> {
        self.namespaces.read().clone()
    }

    fn bootstrap_reference_types(&mut self) {
        fn rt(id: u32, name: &str, inverse: &str, symmetric: bool) -> ReferenceTypeBuilder {
            ReferenceTypeBuilder::new(&NodeId::new(0, id), name, name)
                .inverse_name(if symmetric { name } else { inverse })
        }

        rt(identifiers::REFERENCES, "References", "References", true)
            .is_abstract(true)
            .insert(self);
        rt(
            identifiers::HIERARCHICAL_REFERENCES,
            "HierarchicalReferences",
            "HierarchicalReferences",
            true,
        )
        .is_abstract(true)
        .subtype_of(NodeId::new(0, identifiers::REFERENCES))
        .insert(self);
        rt(
            identifiers::NON_HIERARCHICAL_REFERENCES,
            "NonHierarchicalReferences",
            "NonHierarchicalReferences",
            true,
        )
        .is_abstract(true)
        .subtype_of(NodeId::new(0, identifiers::REFERENCES))
        .insert(self);
        rt(identifiers::HAS_CHILD, "HasChild", "ChildOf", false)
            .is_abstract(true)
            .subtype_of(NodeId::new(0, identifiers::HIERARCHICAL_REFERENCES))
            .insert(self);
        rt(identifiers::ORGANIZES, "Organizes", "OrganizedBy", false)
            .subtype_of(NodeId::new(0, identifiers::HIERARCHICAL_REFERENCES))
            .insert(self);
        rt(identifiers::HAS_SUBTYPE, "HasSubtype", "HasSupertype", false)
            .subtype_of(NodeId::new(0, identifiers::HAS_CHILD))
            .insert(self);
        rt(identifiers::HAS_COMPONENT, "HasComponent", "ComponentOf", false)
            .subtype_of(NodeId::new(0, identifiers::HAS_CHILD))
            .insert(self);
        rt(identifiers::HAS_PROPERTY, "HasProperty", "PropertyOf", false)
            .subtype_of(NodeId::new(0, identifiers::HAS_CHILD))
            .insert(self);
        rt(
            identifiers::HAS_TYPE_DEFINITION,
            "HasTypeDefinition",
            "TypeDefinitionOf",
            false,
        )
        .subtype_of(NodeId::new(0, identifiers::NON_HIERARCHICAL_REFERENCES))
        .insert(self);
    }

    fn bootstrap_base_types(&mut self) {
        ObjectTypeBuilder::new(
            &NodeId::new(0, identifiers::BASE_OBJECT_TYPE),
            "BaseObjectType",
            "BaseObjectType",
        )
        .is_abstract(true)
        .insert(self);
        ObjectTypeBuilder::new(&NodeId::new(0, identifiers::FOLDER_TYPE), "FolderType", "FolderType")
            .subtype_of(NodeId::new(0, identifiers::BASE_OBJECT_TYPE))
            .insert(self);

        opcua_nodes::VariableTypeBuilder::new(
            &NodeId::new(0, identifiers::BASE_VARIABLE_TYPE),
            "BaseVariableType",
            "BaseVariableType",
        )
        .is_abstract(true)
        .insert(self);
        opcua_nodes::VariableTypeBuilder::new(
            &NodeId::new(0, identifiers::BASE_DATA_VARIABLE_TYPE),
            "BaseDataVariableType",
            "BaseDataVariableType",
        )
        .subtype_of(NodeId::new(0, identifiers::BASE_VARIABLE_TYPE))
        .insert(self);

        opcua_nodes::DataTypeBuilder::new(
            &NodeId::new(0, identifiers::BASE_DATA_TYPE),
            "BaseDataType",
            "BaseDataType",
        )
        .is_abstract(true)
        .insert(self);

        for (id, name) in [
            (identifiers::BOOLEAN, "Boolean"),
            (identifiers::SBYTE, "SByte"),
            (identifiers::BYTE, "Byte"),
            (identifiers::INT16, "Int16"),
            (identifiers::UINT16, "UInt16"),
            (identifiers::INT32, "Int32"),
            (identifiers::UINT32, "UInt32"),
            (identifiers::INT64, "Int64"),
            (identifiers::UINT64, "UInt64"),
            (identifiers::FLOAT, "Float"),
            (identifiers::DOUBLE, "Double"),
            (identifiers::STRING, "String"),
            (identifiers::DATE_TIME, "DateTime"),
            (identifiers::GUID, "Guid"),
            (identifiers::BYTE_STRING, "ByteString"),
            (identifiers::LOCALIZED_TEXT, "LocalizedText"),
        ] {
            opcua_nodes::DataTypeBuilder::new(&NodeId::new(0, id), name, name)
                .subtype_of(NodeId::new(0, identifiers::BASE_DATA_TYPE))
                .insert(self);
        }
    }

    fn bootstrap_folders(&mut self) {
        ObjectBuilder::new(&NodeId::new(0, identifiers::ROOT_FOLDER), "Root", "Root")
            .is_folder()
            .insert(self);
        ObjectBuilder::new(&NodeId::new(0, identifiers::OBJECTS_FOLDER), "Objects", "Objects")
            .is_folder()
            .organized_by(NodeId::new(0, identifiers::ROOT_FOLDER))
            .insert(self);
        ObjectBuilder::new(&NodeId::new(0, identifiers::TYPES_FOLDER), "Types", "Types")
            .is_folder()
            .organized_by(NodeId::new(0, identifiers::ROOT_FOLDER))
            .insert(self);
        ObjectBuilder::new(&NodeId::new(0, identifiers::VIEWS_FOLDER), "Views", "Views")
            .is_folder()
            .organized_by(NodeId::new(0, identifiers::ROOT_FOLDER))
            .insert(self);
    }

    fn bootstrap_server_object(&mut self, status: &ServerStatusWrapper) {
        ObjectBuilder::new(&NodeId::new(0, identifiers::SERVER), "Server", "Server")
            .has_type_definition(NodeId::new(0, identifiers::BASE_OBJECT_TYPE))
            .organized_by(NodeId::new(0, identifiers::OBJECTS_FOLDER))
            .insert(self);

        let mut namespace_array_var = Variable::new(
            &NodeId::new(0, identifiers::SERVER_NAMESPACE_ARRAY),
            "NamespaceArray",
            "NamespaceArray",
            NodeId::new(0, identifiers::STRING),
            Variant::Array(vec![]),
        );
        namespace_array_var.set_value_rank(1);
        let namespaces = self.namespaces.clone();
        namespace_array_var.set_value_getter(move || {
            let entries = namespaces.read().iter().cloned().map(Variant::String).collect();
            DataValue::new_now(Variant::Array(entries))
        });
        insert_prebuilt_variable(self, namespace_array_var, NodeId::new(0, identifiers::SERVER));

        VariableBuilder::new(
            &NodeId::new(0, identifiers::SERVER_SERVER_ARRAY),
            "ServerArray",
            "ServerArray",
        )
        .data_type(NodeId::new(0, identifiers::STRING))
        .value_rank(1)
        .value(Variant::Array(vec![Variant::String(config_application_uri(self))]))
        .has_type_definition(NodeId::new(0, identifiers::BASE_DATA_VARIABLE_TYPE))
        .component_of(NodeId::new(0, identifiers::SERVER))
        .insert(self);

        let state_getter = status.state_source();
        let mut state_var = Variable::new(
            &NodeId::new(0, identifiers::SERVER_SERVER_STATUS_STATE),
            "State",
            "State",
            NodeId::new(0, identifiers::INT32),
            0i32,
        );
        if let opcua_nodes::ValueSource::Callback(f) = state_getter {
            state_var.set_value_getter(move || f());
        }
        insert_prebuilt_variable(
            self,
            state_var,
            NodeId::new(0, identifiers::SERVER),
        );

        let time_getter = status.current_time_source();
        let mut time_var = Variable::new(
            &NodeId::new(0, identifiers::SERVER_SERVER_STATUS_CURRENT_TIME),
            "CurrentTime",
            "CurrentTime",
            NodeId::new(0, identifiers::DATE_TIME),
            chrono::Utc::now(),
        );
        if let opcua_nodes::ValueSource::Callback(f) = time_getter {
            time_var.set_value_getter(move || f());
        }
        insert_prebuilt_variable(self, time_var, NodeId::new(0, identifiers::SERVER));

        VariableBuilder::new(
            &NodeId::new(0, identifiers::SERVER_SERVICE_LEVEL),
            "ServiceLevel",
            "ServiceLevel",
        )
        .data_type(NodeId::new(0, identifiers::BYTE))
        .value(255u8)
        .has_type_definition(NodeId::new(0, identifiers::BASE_DATA_VARIABLE_TYPE))
        .component_of(NodeId::new(0, identifiers::SERVER))
        .insert(self);
    }

    /// Look up a node by id.
    pub fn find_node(&self, node_id: &NodeId) -> Option<&NodeType> {
        self.nodes.get(node_id)
    }

    /// Look up a node by id, mutably.
    pub fn find_node_mut(&mut self, node_id: &NodeId) -> Option<&mut NodeType> {
        self.nodes.get_mut(node_id)
    }

    /// All outgoing references from `node_id`, in insertion order.
    pub fn find_references(&self, node_id: &NodeId) -> &[Reference] {
        self.references.references_from(node_id)
    }

    /// Find a child of `parent` by its exact browse name, following
    /// forward references of any type. Used to resolve a relative browse
    /// path one segment at a time.
    pub fn find_node_by_browse_name(&self, parent: &NodeId, browse_name: &QualifiedName) -> Option<&NodeId> {
        self.references.references_from(parent).iter().find_map(|r| {
            let target = self.nodes.get(&r.target_node)?;
            (target.as_node_base().browse_name() == browse_name).then_some(&r.target_node)
        })
    }

    /// True if `candidate` is `base` or a transitive `HasSubtype` child of
    /// it.
    pub fn is_subtype_of(&self, candidate: &NodeId, base: &NodeId) -> bool {
        self.type_tree.is_subtype_of(candidate, base)
    }

    /// The number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no nodes are stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node, reference, and namespace, used when the server
    /// shuts down.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.references = References::new();
        self.type_tree = TypeTree::new();
        self.namespaces.write().clear();
    }
}

fn config_application_uri(address_space: &AddressSpace) -> String {
    address_space.namespaces.read().get(1).cloned().unwrap_or_default()
}

fn insert_prebuilt_variable(address_space: &mut AddressSpace, variable: Variable, parent: NodeId) {
    let node_id = variable.node_id().clone();
    let variable_type = NodeId::new(0, identifiers::BASE_DATA_VARIABLE_TYPE);
    let has_type_definition = NodeId::new(0, identifiers::HAS_TYPE_DEFINITION);
    let has_component = NodeId::new(0, identifiers::HAS_COMPONENT);
    let refs = [
        (&variable_type, &has_type_definition, ReferenceDirection::Forward),
        (&parent, &has_component, ReferenceDirection::Inverse),
    ];
    let inserted = address_space.insert(variable, Some(&refs));
    debug_assert!(inserted, "failed to insert prebuilt variable {node_id}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    fn bootstrap() -> AddressSpace {
        let config = ServerConfig::default();
        let status = ServerStatusWrapper::new(opcua_types::BuildInfo {
            product_uri: config.product_uri.clone(),
            manufacturer_name: "Test".to_string(),
            product_name: "Test Server".to_string(),
            software_version: "0.1.0".to_string(),
            build_number: "0".to_string(),
            build_date: chrono::Utc::now(),
        });
        AddressSpace::bootstrap(&config, &status)
    }

    #[test]
    fn namespace_array_has_opcfoundation_and_app_uri() {
        let address_space = bootstrap();
        assert_eq!(address_space.namespace_array()[0], "http://opcfoundation.org/UA/");
        assert_eq!(address_space.namespace_array()[1], "urn:opcua-server");
    }

    #[test]
    fn namespace_array_variable_reflects_later_add_namespace() {
        let mut address_space = bootstrap();
        let variable_id = NodeId::new(0, identifiers::SERVER_NAMESPACE_ARRAY);
        let len_before = match address_space.find_node(&variable_id).unwrap() {
            NodeType::Variable(v) => match v.value(false).unwrap().value {
                Some(Variant::Array(entries)) => entries.len(),
                _ => panic!("expected array value"),
            },
            _ => panic!("expected a variable"),
        };

        address_space.add_namespace("urn:late-namespace");

        let len_after = match address_space.find_node(&variable_id).unwrap() {
            NodeType::Variable(v) => match v.value(false).unwrap().value {
                Some(Variant::Array(entries)) => entries.len(),
                _ => panic!("expected array value"),
            },
            _ => panic!("expected a variable"),
        };
        assert_eq!(len_after, len_before + 1);
    }

    #[test]
    fn root_is_organized_by_nothing_but_organizes_objects() {
        let address_space = bootstrap();
        let root = NodeId::new(0, identifiers::ROOT_FOLDER);
        let refs = address_space.find_references(&root);
        let targets: Vec<_> = refs.iter().map(|r| r.target_node.clone()).collect();
        assert!(targets.contains(&NodeId::new(0, identifiers::OBJECTS_FOLDER)));
        assert!(targets.contains(&NodeId::new(0, identifiers::TYPES_FOLDER)));
        assert!(targets.contains(&NodeId::new(0, identifiers::VIEWS_FOLDER)));
    }

    #[test]
    fn has_subtype_edges_populate_type_tree() {
        let address_space = bootstrap();
        assert!(address_space.is_subtype_of(
            &NodeId::new(0, identifiers::HAS_SUBTYPE),
            &NodeId::new(0, identifiers::REFERENCES)
        ));
        assert!(address_space.is_subtype_of(
            &NodeId::new(0, identifiers::FOLDER_TYPE),
            &NodeId::new(0, identifiers::BASE_OBJECT_TYPE)
        ));
    }

    #[test]
    fn variable_with_unknown_type_definition_is_rejected() {
        let mut address_space = bootstrap();
        let missing_type = NodeId::new(0, 999_999u32);
        let variable = Variable::new(
            &NodeId::new(1, "orphan"),
            "Orphan",
            "Orphan",
            NodeId::new(0, identifiers::INT32),
            1i32,
        );
        let refs = [(
            &missing_type,
            &NodeId::new(0, identifiers::HAS_TYPE_DEFINITION),
            ReferenceDirection::Forward,
        )];
        assert!(!address_space.insert(variable, Some(&refs)));
    }

    #[test]
    fn server_status_state_reads_running_after_set_running() {
        let config = ServerConfig::default();
        let status = ServerStatusWrapper::new(opcua_types::BuildInfo {
            product_uri: config.product_uri.clone(),
            manufacturer_name: "Test".to_string(),
            product_name: "Test Server".to_string(),
            software_version: "0.1.0".to_string(),
            build_number: "0".to_string(),
            build_date: chrono::Utc::now(),
        });
        status.set_running();
        let address_space = AddressSpace::bootstrap(&config, &status);
        let node = address_space
            .find_node(&NodeId::new(0, identifiers::SERVER_SERVER_STATUS_STATE))
            .unwrap();
        let NodeType::Variable(variable) = node else {
            panic!("expected variable");
        };
        let value = variable.value(false).unwrap();
        assert_eq!(
            value.value,
            Some(Variant::Int32(opcua_types::ServerState::Running as i32))
        );
    }
}
