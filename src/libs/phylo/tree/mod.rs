pub mod traversal;

use super::node::{Node, NodeId};

/// Arena-backed phylogenetic tree.
///
/// Nodes are never removed, so a `NodeId` stays valid for the lifetime of the
/// tree. Parent and child links are kept consistent by [`Tree::add_child`].
#[derive(Debug, Default, Clone)]
pub struct Tree {
    nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    root: Option<NodeId>,
}

impl Tree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node to the tree. Returns the new node's ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    /// Add a named leaf. Returns the new node's ID.
    pub fn add_leaf(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.add_node();
        self.nodes[id].set_name(name);
        id
    }

    /// Get number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Set a node as the root of the tree.
    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    /// Add a child to a parent node.
    /// Updates both parent's `children` list and child's `parent` field.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        if parent_id == child_id {
            return Err("Cannot add node as child of itself".to_string());
        }
        if self.get_node(parent_id).is_none() {
            return Err(format!("Parent node {} not found", parent_id));
        }
        if self.get_node(child_id).is_none() {
            return Err(format!("Child node {} not found", child_id));
        }
        if let Some(old_parent) = self.nodes[child_id].parent {
            return Err(format!(
                "Node {} already has parent {}",
                child_id, old_parent
            ));
        }

        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);

        Ok(())
    }

    /// Attach `child_id` under `parent_id` with the given branch length.
    pub fn add_child_with_length(
        &mut self,
        parent_id: NodeId,
        child_id: NodeId,
        length: f64,
    ) -> Result<(), String> {
        self.add_child(parent_id, child_id)?;
        self.nodes[child_id].length = Some(length);
        Ok(())
    }

    pub fn preorder(&self, start_node: NodeId) -> Vec<NodeId> {
        traversal::preorder(self, start_node)
    }

    pub fn postorder(&self, start_node: NodeId) -> Vec<NodeId> {
        traversal::postorder(self, start_node)
    }

    /// Leaves reachable from the root, left to right.
    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self
                .preorder(root)
                .into_iter()
                .filter(|&id| self.nodes[id].is_leaf())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn get_leaf_names(&self) -> Vec<Option<String>> {
        self.get_leaves()
            .into_iter()
            .map(|id| self.nodes[id].name.clone())
            .collect()
    }

    /// Sum of branch lengths from `id` up to the root.
    pub fn get_depth(&self, id: NodeId) -> f64 {
        let mut depth = 0.0;
        let mut cur = self.get_node(id);
        while let Some(node) = cur {
            depth += node.length.unwrap_or(0.0);
            cur = node.parent.and_then(|p| self.get_node(p));
        }
        depth
    }

    /// Path length between two nodes, via their lowest common ancestor.
    pub fn get_distance(&self, a: NodeId, b: NodeId) -> Result<f64, String> {
        let path_a = self.path_to_root(a)?;
        let path_b = self.path_to_root(b)?;
        let lca = path_a
            .iter()
            .find(|id| path_b.contains(id))
            .copied()
            .ok_or_else(|| format!("Nodes {} and {} are not connected", a, b))?;

        Ok(self.get_depth(a) + self.get_depth(b) - 2.0 * self.get_depth(lca))
    }

    fn path_to_root(&self, id: NodeId) -> Result<Vec<NodeId>, String> {
        let mut path = vec![];
        let mut cur = Some(id);
        while let Some(cid) = cur {
            let node = self
                .get_node(cid)
                .ok_or_else(|| format!("Node {} not found", cid))?;
            path.push(cid);
            cur = node.parent;
        }
        Ok(path)
    }

    /// Node of the leaf carrying `name`.
    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.name.as_deref() == Some(name))
            .map(|n| n.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root
    // ├── i1:1
    // │   ├── A:2
    // │   └── B:3
    // └── C:4
    fn sample() -> Tree {
        let mut tree = Tree::new();
        let root = tree.add_node();
        let i1 = tree.add_node();
        let a = tree.add_leaf("A");
        let b = tree.add_leaf("B");
        let c = tree.add_leaf("C");
        tree.set_root(root);
        tree.add_child_with_length(root, i1, 1.0).unwrap();
        tree.add_child_with_length(i1, a, 2.0).unwrap();
        tree.add_child_with_length(i1, b, 3.0).unwrap();
        tree.add_child_with_length(root, c, 4.0).unwrap();
        tree
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let tree = sample();
        let root = tree.get_root().unwrap();
        assert_eq!(tree.get_node(root).unwrap().children, vec![1, 4]);
        assert_eq!(tree.get_node(2).unwrap().parent, Some(1));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_add_child_rejects_bad_links() {
        let mut tree = sample();
        assert!(tree.add_child(0, 0).is_err());
        assert!(tree.add_child(0, 99).is_err());
        // A already hangs under i1
        assert!(tree.add_child(4, 2).is_err());
    }

    #[test]
    fn test_leaves_in_order() {
        let tree = sample();
        assert_eq!(tree.get_leaves(), vec![2, 3, 4]);
        assert_eq!(
            tree.get_leaf_names(),
            vec![Some("A".to_string()), Some("B".to_string()), Some("C".to_string())]
        );
    }

    #[test]
    fn test_distance() {
        let tree = sample();
        let a = tree.get_node_by_name("A").unwrap();
        let b = tree.get_node_by_name("B").unwrap();
        let c = tree.get_node_by_name("C").unwrap();
        assert_eq!(tree.get_distance(a, b).unwrap(), 5.0);
        assert_eq!(tree.get_distance(a, c).unwrap(), 7.0);
        assert_eq!(tree.get_distance(c, c).unwrap(), 0.0);
    }
}
