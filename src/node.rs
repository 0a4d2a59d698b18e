use crate::merkle::Element;

/// Position of a node in the tree's node arena.
pub type NodeIndex = usize;

/// Vertex of a merkle tree.
///
/// Nodes live in the arena owned by `MerkleTree` and reference their
/// children by [`NodeIndex`]. A node either has both children (interior
/// node, `hash = H(left, right)` subject to pair sorting) or none (leaf node,
/// `hash` is one of the input digests). The upward relation is kept by the
/// tree in a separate parent table.
#[derive(Debug, Clone)]
pub struct Node<T: Element> {
    hash: T,
    children: Option<(NodeIndex, NodeIndex)>,
}

impl<T: Element> Node<T> {
    pub(crate) fn leaf(hash: T) -> Node<T> {
        Node {
            hash,
            children: None,
        }
    }

    pub(crate) fn interior(hash: T, left: NodeIndex, right: NodeIndex) -> Node<T> {
        Node {
            hash,
            children: Some((left, right)),
        }
    }

    /// Returns the digest held by this node.
    pub fn hash(&self) -> &T {
        &self.hash
    }

    /// Returns the left child, if any.
    pub fn left(&self) -> Option<NodeIndex> {
        self.children.map(|(left, _)| left)
    }

    /// Returns the right child, if any.
    pub fn right(&self) -> Option<NodeIndex> {
        self.children.map(|(_, right)| right)
    }

    /// Returns `true` for nodes without children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub(crate) fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        self.children
    }
}

// Equality is by digest only, wherever the nodes sit in the tree.
impl<T: Element> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hash.as_ref() == other.hash.as_ref()
    }
}

impl<T: Element> Eq for Node<T> {}
