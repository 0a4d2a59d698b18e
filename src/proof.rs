use std::ops;

use anyhow::{ensure, Result};
use log::debug;

use crate::encoding::to_hex;
use crate::hash::Algorithm;
use crate::merkle::Element;

#[cfg(test)]
use crate::merkle::MerkleTree;
#[cfg(test)]
use crate::options::Options;
#[cfg(test)]
use crate::test_common::{get_vec_tree_from_slice, Item, XOR128Vec, XOR128};

/// Merkle tree inclusion proof for a leaf.
///
/// Sibling layout, bottom to top:
///
/// ```text
/// [ sibling(leaf) sibling(parent) sibling(grandparent) ... ]
/// ```
///
/// The root and the leaf are not part of the proof. `path` records, for
/// every sibling, whether the walked node was the left child of its parent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Proof<T: Element> {
    siblings: Vec<T>,
    path: Vec<bool>, // true when the walked node is the left child
}

impl<T: Element> Proof<T> {
    /// Creates new MT inclusion proof
    pub fn new(siblings: Vec<T>, path: Vec<bool>) -> Result<Proof<T>> {
        ensure!(
            siblings.len() == path.len(),
            "Invalid path length {} for {} siblings",
            path.len(),
            siblings.len()
        );
        Ok(Proof::from_parts(siblings, path))
    }

    pub(crate) fn from_parts(siblings: Vec<T>, path: Vec<bool>) -> Proof<T> {
        Proof { siblings, path }
    }

    /// Returns the sibling digests, bottom to top.
    pub fn siblings(&self) -> &[T] {
        &self.siblings
    }

    /// Returns the path of this proof.
    pub fn path(&self) -> &[bool] {
        &self.path
    }

    /// Returns the sibling digests, dropping the path.
    pub fn into_inner(self) -> Vec<T> {
        self.siblings
    }

    /// Returns the sibling digests as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(to_hex).collect()
    }

    /// Recomputes the root from `leaf` following the recorded path.
    ///
    /// `sort_pairs` must match the option the tree was built with. Unlike
    /// [`verify`], this works for trees built without pair sorting.
    pub fn validate<A: Algorithm<T>>(&self, leaf: &T, root: &T, sort_pairs: bool) -> bool {
        let mut h = leaf.clone();

        for (sibling, &is_left) in self.siblings.iter().zip(&self.path) {
            let mut a = A::default();
            let next = if sort_pairs {
                a.sorted_node(&h, sibling)
            } else if is_left {
                a.node(&h, sibling)
            } else {
                a.node(sibling, &h)
            };

            h = match next {
                Ok(h) => h,
                Err(e) => {
                    debug!("proof validation aborted: {:#}", e);
                    return false;
                }
            };
        }

        h.as_ref() == root.as_ref()
    }
}

impl<T: Element> ops::Deref for Proof<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.siblings
    }
}

/// Checks that `leaf` belongs to the tree of `root` using only `proof`.
///
/// Every step hashes the accumulator and the next sibling in ascending byte
/// order, whatever the tree's configuration was. The result is only
/// meaningful for proofs taken from trees built with `sort_pairs = true`;
/// proofs from other trees will generally fail here.
///
/// Absent input (`None` proof, empty root or leaf bytes) and hash failures
/// yield `false`, as does a mismatch.
pub fn verify<T: Element, A: Algorithm<T>>(root: &T, leaf: &T, proof: Option<&[T]>) -> bool {
    let proof = match proof {
        Some(proof) if !root.as_ref().is_empty() && !leaf.as_ref().is_empty() => proof,
        _ => return false,
    };

    let mut h = leaf.clone();
    for sibling in proof {
        h = match A::default().sorted_node(&h, sibling) {
            Ok(h) => h,
            Err(e) => {
                debug!("proof verification aborted: {:#}", e);
                return false;
            }
        };
    }

    h.as_ref() == root.as_ref()
}

#[cfg(test)]
// Flip one random bit of `el`.
fn modify_item(el: &mut Item) {
    use rand::prelude::*;

    let i = random::<usize>() % el.len();
    let bit = random::<u8>() % 8;
    el[i] ^= 1 << bit;
}

#[test]
fn test_proofs() {
    let leafs = 1029;
    let tree = get_vec_tree_from_slice(leafs, Options::sorted());
    let root = tree.root();

    for leaf in tree.leaves() {
        let p = tree.proof(&leaf).unwrap();
        assert!(verify::<_, XOR128>(&root, &leaf, Some(p.siblings())));
        assert!(p.validate::<XOR128>(&leaf, &root, true));

        // Break the proof here and assert negative validation.
        let mut siblings = p.clone().into_inner();
        let i = rand::random::<usize>() % siblings.len();
        modify_item(&mut siblings[i]);
        assert!(!verify::<_, XOR128>(&root, &leaf, Some(&siblings[..])));

        let mut bad_leaf = leaf;
        modify_item(&mut bad_leaf);
        assert!(!verify::<_, XOR128>(&root, &bad_leaf, Some(p.siblings())));

        let mut bad_root = root;
        modify_item(&mut bad_root);
        assert!(!verify::<_, XOR128>(&bad_root, &leaf, Some(p.siblings())));
    }
}

#[test]
fn test_verify_absent_input() {
    let tree = get_vec_tree_from_slice(4, Options::sorted());
    let root = tree.root();
    let leaf = tree.leaves()[1];
    let proof = tree.proof(&leaf);

    assert!(verify::<_, XOR128>(&root, &leaf, proof.as_deref()));
    assert!(!verify::<_, XOR128>(&root, &leaf, None));

    let mut missing = leaf;
    missing[15] ^= 0xff;
    assert!(!verify::<_, XOR128>(&root, &missing, tree.proof(&missing).as_deref()));
}

#[test]
fn test_verify_empty_digests() {
    let proof: Vec<Vec<u8>> = vec![vec![1u8; 16]];
    let leaf = vec![2u8; 16];

    let tree: MerkleTree<Vec<u8>, XOR128Vec> =
        MerkleTree::new(vec![leaf.clone(), proof[0].clone()], Options::sorted()).unwrap();
    let root = tree.root();
    assert!(verify::<_, XOR128Vec>(&root, &leaf, Some(&proof[..])));

    let empty: Vec<u8> = Vec::new();
    assert!(!verify::<_, XOR128Vec>(&empty, &leaf, Some(&proof[..])));
    assert!(!verify::<_, XOR128Vec>(&root, &empty, Some(&proof[..])));
}

#[test]
fn test_new_checks_path() {
    assert!(Proof::new(vec![[0u8; 16], [1u8; 16]], vec![true, false]).is_ok());
    assert!(Proof::new(vec![[0u8; 16]], vec![true, false]).is_err());
}

#[test]
fn test_proof_hex() {
    let p = Proof::new(vec![[0xabu8; 2], [0x01u8; 2]], vec![true, true]).unwrap();
    assert_eq!(p.to_hex(), vec!["0xabab".to_string(), "0x0101".to_string()]);
    assert_eq!(p.len(), 2);
    assert!(!p.is_empty());
    assert_eq!(p.path(), &[true, true]);
}
