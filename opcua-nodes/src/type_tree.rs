// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! A minimal type hierarchy, tracking only the `HasSubtype` edges needed to
//! answer "is A a subtype of B" for reference-type and data-type filtering
//! during browse.

use hashbrown::HashMap;
use opcua_types::NodeId;

/// Tracks `HasSubtype` edges (`supertype -> subtype`) and answers subtype
/// queries over the resulting hierarchy.
#[derive(Debug, Default)]
pub struct TypeTree {
    /// Maps a subtype to its direct supertype.
    supertype_of: HashMap<NodeId, NodeId>,
}

impl TypeTree {
    /// Create an empty type tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `subtype` is a direct `HasSubtype` child of `supertype`.
    pub fn add_subtype(&mut self, supertype: NodeId, subtype: NodeId) {
        self.supertype_of.insert(subtype, supertype);
    }

    /// True if `candidate` is `base`, or transitively a subtype of `base`.
    pub fn is_subtype_of(&self, candidate: &NodeId, base: &NodeId) -> bool {
        if candidate == base {
            return true;
        }
        let mut current = candidate;
        // The hierarchy is a DAG rooted at `References`/`BaseObjectType`/etc,
        // so a bound on hops defends against an accidental cycle rather than
        // relying on one never being introduced.
        for _ in 0..self.supertype_of.len() + 1 {
            match self.supertype_of.get(current) {
                Some(parent) if parent == base => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// The direct supertype of `node`, if any.
    pub fn direct_supertype(&self, node: &NodeId) -> Option<&NodeId> {
        self.supertype_of.get(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitive_subtype_is_found() {
        let mut tree = TypeTree::new();
        let a = NodeId::new(0, 1u32);
        let b = NodeId::new(0, 2u32);
        let c = NodeId::new(0, 3u32);
        tree.add_subtype(a.clone(), b.clone());
        tree.add_subtype(b.clone(), c.clone());
        assert!(tree.is_subtype_of(&c, &a));
        assert!(tree.is_subtype_of(&c, &b));
        assert!(!tree.is_subtype_of(&a, &c));
    }

    #[test]
    fn node_is_subtype_of_itself() {
        let tree = TypeTree::new();
        let a = NodeId::new(0, 1u32);
        assert!(tree.is_subtype_of(&a, &a));
    }
}
