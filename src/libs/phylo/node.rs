/// NodeId is an index into the Tree's node vector.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index in the arena
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    pub children: Vec<NodeId>,

    /// Taxon name. Internal nodes built by neighbor-joining are unnamed.
    pub name: Option<String>,

    /// Branch length to parent
    pub length: Option<f64>,
}

impl Node {
    /// Create a new empty node with a specific ID
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Set the name of the node (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the branch length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
