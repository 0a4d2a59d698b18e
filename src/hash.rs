//! Hash infrastructure for items in Merkle Tree.

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

use anyhow::Result;

use crate::merkle::Element;

/// A hashable type.
///
/// Types implementing `Hashable` are able to be [`hash`]ed with an instance of
/// [`Hasher`]. It is used to turn raw data items into leaf digests before the
/// tree is built (see `MerkleTree::from_data`).
///
/// ```text
/// use merkle_proofs::hash::Hashable;
///
/// struct Account {
///     id: u32,
///     name: String,
/// }
///
/// impl<H: Hasher> Hashable<H> for Account {
///     fn hash(&self, state: &mut H) {
///         self.id.hash(state);
///         self.name.hash(state);
///     }
/// }
/// ```
///
/// [`hash`]: #tymethod.hash
pub trait Hashable<H: Hasher> {
    /// Feeds this value into the given [`Hasher`].
    fn hash(&self, state: &mut H);

    /// Feeds this value as one element of a composite value (slice, array,
    /// tuple). Variable length values write their length first so that the
    /// element boundaries stay recoverable.
    fn hash_delimited(&self, state: &mut H) {
        self.hash(state);
    }

    /// Feeds a slice of this type into the given [`Hasher`].
    fn hash_slice(data: &[Self], state: &mut H)
    where
        Self: Sized,
    {
        for piece in data {
            piece.hash_delimited(state);
        }
    }
}

/// Byte sink collecting everything a [`Hashable`] value writes.
///
/// `MerkleTree::from_data` serializes each item here first, then pushes the
/// bytes through [`Algorithm::try_write`], so adapter failures on leaf data
/// are reported.
#[derive(Debug, Clone, Default)]
pub struct LeafBuffer(Vec<u8>);

impl LeafBuffer {
    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Drops the collected bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Hasher for LeafBuffer {
    fn write(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    fn finish(&self) -> u64 {
        let mut h = DefaultHasher::new();
        h.write(&self.0);
        h.finish()
    }
}

/// Hashing algorithm type.
///
/// Algorithm conforms standard [`Hasher`] trait and provides methods to return
/// full length hash and reset current state. `Default` acts as the factory:
/// the tree and the verifier take a fresh instance for every pair they hash,
/// so an algorithm value is never shared between two computations.
pub trait Algorithm<T>: Hasher + Default
where
    T: Element,
{
    /// Returns the hash value for the data stream written so far.
    fn hash(&mut self) -> T;

    /// Reset Hasher state.
    fn reset(&mut self);

    /// Writes bytes into the digest state.
    ///
    /// Infallible digests keep the default, which forwards to
    /// [`Hasher::write`]. Adapters over digests that can fail on input
    /// override it and report the failure.
    fn try_write(&mut self, bytes: &[u8]) -> Result<()> {
        self.write(bytes);
        Ok(())
    }

    /// Returns the hash of `left || right`, in that order.
    fn node(&mut self, left: &T, right: &T) -> Result<T> {
        self.reset();
        self.try_write(left.as_ref())?;
        self.try_write(right.as_ref())?;
        Ok(self.hash())
    }

    /// Returns the hash of the pair fed in ascending byte order.
    fn sorted_node(&mut self, a: &T, b: &T) -> Result<T> {
        if a.as_ref() > b.as_ref() {
            self.node(b, a)
        } else {
            self.node(a, b)
        }
    }
}
