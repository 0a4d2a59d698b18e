use std::fmt;
use std::marker::PhantomData;

use anyhow::{ensure, Result};
use log::{debug, trace};

use crate::encoding::to_hex;
use crate::error::ConstructionError;
use crate::hash::{Algorithm, Hashable, LeafBuffer};
use crate::node::{Node, NodeIndex};
use crate::options::Options;
use crate::proof::Proof;

/// Merkle Tree.
///
/// All nodes are stored in a linear array (vec) used as an arena: leaves
/// first, in the order they were hashed, then every interior node in the
/// order it was created. Children are referenced by index and the upward
/// relation is kept in a parallel table of parent indices.
///
/// ```text
///         root = h123 = h(h12 + h3)
///        /                        \
///  h12 = h(h1 + h2)                h3
///   /            \
///  h1            h2
/// ```
///
/// In memory layout:
///
/// ```text
///     [h1 h2 h3 h12 root]
/// ```
///
/// A layer of odd width does not duplicate its last node: the node is
/// promoted to the next layer as is, without being hashed. With
/// `Options::sort_pairs` every pair is hashed in ascending byte order, while
/// the children keep their scan order in the tree.
///
/// The tree is immutable once built.
#[derive(Clone)]
pub struct MerkleTree<T, A>
where
    T: Element,
    A: Algorithm<T>,
{
    nodes: Vec<Node<T>>,
    parents: Vec<Option<NodeIndex>>,
    leafs: usize,
    root: NodeIndex,
    height: usize,
    options: Options,
    _a: PhantomData<A>,
}

/// Element stored in the merkle tree.
///
/// Ordering between elements is always taken on their byte form.
pub trait Element: Ord + Clone + AsRef<[u8]> + Sync + Send + fmt::Debug {
    /// Creates the element from its byte form.
    fn from_slice(bytes: &[u8]) -> Result<Self>;
}

impl<const N: usize> Element for [u8; N] {
    fn from_slice(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == N,
            "invalid length {}, expected {}",
            bytes.len(),
            N
        );

        let mut el = [0u8; N];
        el.copy_from_slice(bytes);
        Ok(el)
    }
}

impl Element for Vec<u8> {
    fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl<T: Element, A: Algorithm<T>> MerkleTree<T, A> {
    /// Creates new merkle tree from a sequence of leaf hashes.
    pub fn new<I: IntoIterator<Item = T>>(
        leaves: I,
        options: Options,
    ) -> Result<MerkleTree<T, A>, ConstructionError> {
        let mut nodes: Vec<Node<T>> = leaves.into_iter().map(Node::leaf).collect();
        if nodes.is_empty() {
            return Err(ConstructionError::EmptyInput);
        }

        // Stable: equal digests keep their input order.
        if options.sort_leaves {
            nodes.sort_by(|a, b| a.hash().as_ref().cmp(b.hash().as_ref()));
        }

        Self::build(nodes, options)
    }

    /// Creates new merkle tree from a list of hashable objects, each one
    /// hashed with `A` into a leaf.
    ///
    /// Items are serialized into a [`LeafBuffer`] and the bytes are fed to
    /// the algorithm with `try_write`; a rejected write is reported as a
    /// `HashFailure` at layer 0.
    pub fn from_data<O: Hashable<LeafBuffer>, I: IntoIterator<Item = O>>(
        data: I,
        options: Options,
    ) -> Result<MerkleTree<T, A>, ConstructionError> {
        let mut buf = LeafBuffer::default();
        let mut leaves = Vec::new();

        for item in data {
            buf.clear();
            item.hash(&mut buf);

            let leaf = Self::hash_leaf(buf.as_bytes())
                .map_err(|source| ConstructionError::HashFailure { layer: 0, source })?;
            leaves.push(leaf);
        }

        Self::new(leaves, options)
    }

    #[inline]
    fn hash_leaf(data: &[u8]) -> Result<T> {
        let mut a = A::default();
        a.try_write(data)?;
        Ok(a.hash())
    }

    fn build(mut nodes: Vec<Node<T>>, options: Options) -> Result<Self, ConstructionError> {
        let leafs = nodes.len();
        let mut parents: Vec<Option<NodeIndex>> = vec![None; leafs];

        // n leaves always produce n - 1 interior nodes.
        nodes.reserve(leafs - 1);
        parents.reserve(leafs - 1);

        let mut layer: Vec<NodeIndex> = (0..leafs).collect();
        let mut level: usize = 0;
        while layer.len() > 1 {
            let mut next = Vec::with_capacity((layer.len() + 1) / 2);

            for pair in layer.chunks(2) {
                match *pair {
                    [left, right] => {
                        let hash = Self::hash_pair(
                            nodes[left].hash(),
                            nodes[right].hash(),
                            options.sort_pairs,
                        )
                        .map_err(|source| ConstructionError::HashFailure {
                            layer: level,
                            source,
                        })?;

                        let index = nodes.len();
                        nodes.push(Node::interior(hash, left, right));
                        parents.push(None);
                        parents[left] = Some(index);
                        parents[right] = Some(index);
                        next.push(index);
                    }
                    // Odd one out moves up untouched.
                    [single] => next.push(single),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                }
            }

            layer = next;
            level += 1;
        }

        let root = layer[0];
        let height = level + 1;

        debug!(
            "built merkle tree: leafs {}, nodes {}, height {}, sort_leaves {}, sort_pairs {}",
            leafs,
            nodes.len(),
            height,
            options.sort_leaves,
            options.sort_pairs
        );

        Ok(MerkleTree {
            nodes,
            parents,
            leafs,
            root,
            height,
            options,
            _a: PhantomData,
        })
    }

    #[inline]
    fn hash_pair(left: &T, right: &T, sort_pairs: bool) -> Result<T> {
        let mut a = A::default();
        if sort_pairs {
            a.sorted_node(left, right)
        } else {
            a.node(left, right)
        }
    }

    /// Returns the position, in internal leaf order, of the first leaf equal
    /// to `leaf`.
    pub fn leaf_index(&self, leaf: &T) -> Option<usize> {
        self.nodes[..self.leafs]
            .iter()
            .position(|node| node.hash().as_ref() == leaf.as_ref())
    }

    /// Generates the inclusion proof of the first leaf equal to `leaf`.
    ///
    /// Returns `None` when no leaf matches. A tree made of a single leaf
    /// returns an empty proof for it, since that leaf is the root. When the
    /// same digest appears several times only the first occurrence is
    /// reachable here; use [`gen_proof`](#method.gen_proof) for the others.
    pub fn proof(&self, leaf: &T) -> Option<Proof<T>> {
        match self.leaf_index(leaf) {
            Some(i) => Some(self.walk(i)),
            None => {
                trace!("no leaf {} in tree {}", to_hex(leaf), self.hex_root());
                None
            }
        }
    }

    /// Same as [`proof`](#method.proof), with each sibling hex encoded.
    pub fn hex_proof(&self, leaf: &T) -> Option<Vec<String>> {
        self.proof(leaf).map(|proof| proof.to_hex())
    }

    /// Generate merkle tree inclusion proof for leaf `i` (internal order).
    pub fn gen_proof(&self, i: usize) -> Result<Proof<T>> {
        ensure!(
            i < self.leafs,
            "{} is out of bounds (max: {})",
            i,
            self.leafs
        ); // i in [0 .. self.leafs)

        Ok(self.walk(i))
    }

    // Climbs parent links from node `i`, collecting the sibling at each step.
    fn walk(&self, i: NodeIndex) -> Proof<T> {
        let mut siblings: Vec<T> = Vec::with_capacity(self.height - 1);
        let mut path: Vec<bool> = Vec::with_capacity(self.height - 1);

        let mut current = i;
        while let Some(parent) = self.parents[current] {
            if let Some((left, right)) = self.nodes[parent].children() {
                if current == left {
                    siblings.push(self.nodes[right].hash().clone());
                    path.push(true);
                } else {
                    siblings.push(self.nodes[left].hash().clone());
                    path.push(false);
                }
            }
            current = parent;
        }

        debug!("generated proof of {} siblings for leaf {}", siblings.len(), i);
        Proof::from_parts(siblings, path)
    }

    /// Returns one line per node in pre-order (root, left subtree, right
    /// subtree), each line being the node's hex digest indented by its depth
    /// times `indent`.
    pub fn inspect(&self, indent: &str) -> String {
        let mut out = String::new();
        let mut stack: Vec<(NodeIndex, usize)> = vec![(self.root, 0)];

        while let Some((index, depth)) = stack.pop() {
            let node = &self.nodes[index];
            out.push_str(&indent.repeat(depth));
            out.push_str(&to_hex(node.hash()));
            out.push('\n');

            // Right goes first so that left pops first.
            if let Some((left, right)) = node.children() {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }

        out
    }

    /// Returns merkle root
    #[inline]
    pub fn root(&self) -> T {
        self.nodes[self.root].hash().clone()
    }

    /// Returns merkle root as `0x`-prefixed lowercase hex.
    pub fn hex_root(&self) -> String {
        to_hex(self.nodes[self.root].hash())
    }

    /// Returns copies of the leaf hashes, in the order they were hashed
    /// (sorted when `sort_leaves` was requested).
    pub fn leaves(&self) -> Vec<T> {
        self.nodes[..self.leafs]
            .iter()
            .map(|node| node.hash().clone())
            .collect()
    }

    /// Returns number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns height of the tree, in layers (a single leaf has height 1).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns original number of elements the tree was built upon.
    #[inline]
    pub fn leafs(&self) -> usize {
        self.leafs
    }

    /// Returns the options the tree was built with.
    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the arena index of the root node.
    #[inline]
    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    /// Returns the node at arena index `i`. Leaves are `0..leafs()`.
    pub fn node(&self, i: NodeIndex) -> Option<&Node<T>> {
        self.nodes.get(i)
    }

    /// Returns the parent of the node at arena index `i`; `None` for the root.
    pub fn parent(&self, i: NodeIndex) -> Option<NodeIndex> {
        self.parents.get(i).copied().flatten()
    }
}

impl<T: Element, A: Algorithm<T>> fmt::Debug for MerkleTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("root", &self.hex_root())
            .field("leafs", &self.leafs)
            .field("nodes", &self.nodes.len())
            .field("height", &self.height)
            .field("options", &self.options)
            .finish()
    }
}

impl<T: Element, A: Algorithm<T>> fmt::Display for MerkleTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MerkleTree({})", self.hex_root())
    }
}
