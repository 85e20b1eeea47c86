// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Reference storage.
//!
//! References are kept in insertion order per source node: two browses of
//! the same node must return references in the order they were declared,
//! not in whatever order a hash table happens to iterate them.

use hashbrown::HashMap;
use opcua_types::NodeId;

/// Direction of a reference in the address space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceDirection {
    /// Reference from the source node to the target.
    Forward,
    /// Reference from the target node to the source.
    Inverse,
}

/// An owned OPC-UA reference from some implicit source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Reference type ID.
    pub reference_type: NodeId,
    /// Target node ID.
    pub target_node: NodeId,
    /// Direction relative to the node this reference is stored under.
    pub direction: ReferenceDirection,
}

/// Stores references between nodes, keyed by source node and preserving the
/// order references were added in.
#[derive(Debug, Default)]
pub struct References {
    by_source: HashMap<NodeId, Vec<Reference>>,
    by_target: HashMap<NodeId, Vec<Reference>>,
}

impl References {
    /// Create a new empty reference store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single reference between two nodes. `direction` describes
    /// whether `reference_type` points from `source` to `target`, or the
    /// reverse.
    pub fn insert_reference(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        reference_type: impl Into<NodeId>,
        direction: ReferenceDirection,
    ) {
        assert_ne!(source, target, "self-references are not allowed");
        let reference_type = reference_type.into();

        let (from, to) = match direction {
            ReferenceDirection::Forward => (source, target),
            ReferenceDirection::Inverse => (target, source),
        };

        self.by_source
            .entry(from.clone())
            .or_default()
            .push(Reference {
                reference_type: reference_type.clone(),
                target_node: to.clone(),
                direction: ReferenceDirection::Forward,
            });
        self.by_target
            .entry(to.clone())
            .or_default()
            .push(Reference {
                reference_type,
                target_node: from.clone(),
                direction: ReferenceDirection::Inverse,
            });
    }

    /// All references whose source is `node`, in the order they were
    /// inserted.
    pub fn references_from(&self, node: &NodeId) -> &[Reference] {
        self.by_source
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All references whose target is `node` (i.e. inverse references), in
    /// the order they were inserted.
    pub fn references_to(&self, node: &NodeId) -> &[Reference] {
        self.by_target
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True if `source` has at least one reference of `reference_type`
    /// (or one of its subtypes, per `is_subtype`) to `target`.
    pub fn has_reference(
        &self,
        source: &NodeId,
        target: &NodeId,
        reference_type: &NodeId,
        is_subtype: impl Fn(&NodeId, &NodeId) -> bool,
    ) -> bool {
        self.references_from(source).iter().any(|r| {
            &r.target_node == target
                && (&r.reference_type == reference_type
                    || is_subtype(&r.reference_type, reference_type))
        })
    }

    /// Remove every reference, forward and inverse, that touches `node`.
    pub fn remove_node(&mut self, node: &NodeId) {
        if let Some(refs) = self.by_source.remove(node) {
            for r in refs {
                if let Some(v) = self.by_target.get_mut(&r.target_node) {
                    v.retain(|x| !(x.target_node == *node && x.reference_type == r.reference_type));
                }
            }
        }
        if let Some(refs) = self.by_target.remove(node) {
            for r in refs {
                if let Some(v) = self.by_source.get_mut(&r.target_node) {
                    v.retain(|x| !(x.target_node == *node && x.reference_type == r.reference_type));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_subtypes(_a: &NodeId, _b: &NodeId) -> bool {
        false
    }

    #[test]
    fn references_preserve_insertion_order() {
        let mut refs = References::new();
        let src = NodeId::new(0, 1u32);
        let rt = NodeId::new(0, 35u32);
        for i in 0..5u32 {
            refs.insert_reference(
                &src,
                &NodeId::new(0, 100 + i),
                rt.clone(),
                ReferenceDirection::Forward,
            );
        }
        let targets: Vec<_> = refs
            .references_from(&src)
            .iter()
            .map(|r| r.target_node.clone())
            .collect();
        let expected: Vec<_> = (0..5u32).map(|i| NodeId::new(0, 100 + i)).collect();
        assert_eq!(targets, expected);
    }

    #[test]
    fn inverse_reference_is_recorded() {
        let mut refs = References::new();
        let src = NodeId::new(0, 1u32);
        let dst = NodeId::new(0, 2u32);
        let rt = NodeId::new(0, 35u32);
        refs.insert_reference(&src, &dst, rt.clone(), ReferenceDirection::Forward);
        assert!(refs.has_reference(&src, &dst, &rt, no_subtypes));
        assert_eq!(refs.references_to(&dst).len(), 1);
        assert_eq!(refs.references_to(&dst)[0].target_node, src);
    }
}
