//! light _Merkle Tree_ implementation with sibling path proofs.
//!
//! Merkle tree (MT) built bottom-up over an ordered list of leaf digests.
//! Nodes are kept in an arena (vec) addressed by index, with a parallel
//! table of parent links used to walk from a leaf up to the root. The tree is
//! specialized to the extent of hashing algorithm and digest type; the
//! hashing algorithm is an interface, so the lib does not depend on any
//! crypto library.
//!
//! Tree layout rules:
//!
//! ```text
//! layer(0)   = leaves (sorted ascending when `sort_leaves` is set)
//! layer(k+1) = [ H(a, b) for each pair (a, b) of layer(k) ] ++ [ last ]
//!              where `last` is the unpaired node of an odd layer, moved up
//!              unchanged, and H(a, b) = ALG(min(a, b) || max(a, b)) when
//!              `sort_pairs` is set, ALG(a || b) otherwise.
//! root       = the single node of the last layer
//! ```
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Implementation choices
//!
//! [`Algorithm`] complements [`Hasher`] to be reusable: it returns the full
//! length digest and resets its state. Its `Default` impl is the factory the
//! tree and the verifier use to get a fresh instance for every pair, so no
//! hashing state is ever shared between two computations.
//!
//! Proofs are plain lists of sibling digests, bottom to top. The standalone
//! [`verify`] always hashes each step in ascending byte order: it only
//! accepts proofs of trees built with `sort_pairs`. For other trees use
//! [`Proof::validate`], which follows the recorded left/right path.
//!
//! # Interface
//!
//! ```text
//! - new (leaves, options) -> tree | error
//! - root / hex_root / leaves -> hash(es)
//! - proof (leaf) -> proof | none
//! - verify (root, leaf, proof) -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! use std::collections::hash_map::DefaultHasher;
//! use std::hash::Hasher;
//! use merkle_proofs::hash::Algorithm;
//! use merkle_proofs::merkle::MerkleTree;
//! use merkle_proofs::options::Options;
//! use merkle_proofs::proof::verify;
//!
//! #[derive(Default)]
//! struct Sip(DefaultHasher);
//!
//! impl Hasher for Sip {
//!     fn write(&mut self, msg: &[u8]) {
//!         self.0.write(msg)
//!     }
//!
//!     fn finish(&self) -> u64 {
//!         self.0.finish()
//!     }
//! }
//!
//! impl Algorithm<[u8; 8]> for Sip {
//!     fn hash(&mut self) -> [u8; 8] {
//!         self.finish().to_be_bytes()
//!     }
//!
//!     fn reset(&mut self) {
//!         *self = Sip::default();
//!     }
//! }
//!
//! let tree: MerkleTree<[u8; 8], Sip> =
//!     MerkleTree::from_data(vec!["a", "b", "c"], Options::sorted()).unwrap();
//! let leaf = tree.leaves()[0];
//! let proof = tree.proof(&leaf);
//! assert!(verify::<_, Sip>(&tree.root(), &leaf, proof.as_deref()));
//! ```
//!
//! [`Hasher`]: std::hash::Hasher
//! [`Algorithm`]: hash::Algorithm
//! [`verify`]: proof::verify
//! [`Proof::validate`]: proof::Proof::validate

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Hex rendering of digests.
pub mod encoding;

/// Tree construction errors.
pub mod error;

/// Hash infrastructure for items in Merkle tree.
pub mod hash;

/// Common implementations for [`Hashable`](hash::Hashable).
mod hash_impl;

/// Merkle tree abstractions, implementation and algorithms.
pub mod merkle;

/// Tree nodes.
pub mod node;

/// Tree construction settings.
pub mod options;

/// Merkle tree inclusion proof and standalone verification.
pub mod proof;

pub use error::ConstructionError;
pub use hash::{Algorithm, Hashable, LeafBuffer};
pub use merkle::{Element, MerkleTree};
pub use options::Options;
pub use proof::{verify, Proof};

#[cfg(test)]
mod test_common;


/// Tests for Merkle Hasher Customization
#[cfg(test)]
mod test_cmh;
