use std::cell::Cell;
use std::hash::Hasher;

use anyhow::{bail, Result};

use crate::hash::Algorithm;
use crate::merkle::MerkleTree;
use crate::options::Options;

pub const SIZE: usize = 0x10;

pub type Item = [u8; SIZE];

/// Toy digest: bytes are folded with XOR over a 16 byte ring, so hashing two
/// items after a reset yields `left ^ right`.
#[derive(Debug, Copy, Clone, Default)]
pub struct XOR128 {
    data: Item,
    i: usize,
}

impl XOR128 {
    pub fn new() -> XOR128 {
        XOR128 {
            data: [0; SIZE],
            i: 0,
        }
    }
}

impl Hasher for XOR128 {
    fn write(&mut self, bytes: &[u8]) {
        for x in bytes {
            self.data[self.i & (SIZE - 1)] ^= *x;
            self.i += 1;
        }
    }

    fn finish(&self) -> u64 {
        unimplemented!()
    }
}

impl Algorithm<Item> for XOR128 {
    #[inline]
    fn hash(&mut self) -> Item {
        self.data
    }

    #[inline]
    fn reset(&mut self) {
        *self = XOR128::new();
    }
}

/// XOR128 over variable length elements.
#[derive(Debug, Clone, Default)]
pub struct XOR128Vec(XOR128);

impl Hasher for XOR128Vec {
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes)
    }

    fn finish(&self) -> u64 {
        unimplemented!()
    }
}

impl Algorithm<Vec<u8>> for XOR128Vec {
    fn hash(&mut self) -> Vec<u8> {
        self.0.data.to_vec()
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

thread_local! {
    static PAIR_HASHES: Cell<usize> = Cell::new(0);
}

/// Number of pair hashes done by `CountingXOR128` on this thread.
pub fn pair_hashes() -> usize {
    PAIR_HASHES.with(|c| c.get())
}

pub fn reset_pair_hashes() {
    PAIR_HASHES.with(|c| c.set(0));
}

/// XOR128 counting its pair hashes. Every tree builds its own instances, so
/// the count lives in a thread local.
#[derive(Debug, Clone, Default)]
pub struct CountingXOR128(XOR128);

impl Hasher for CountingXOR128 {
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes)
    }

    fn finish(&self) -> u64 {
        unimplemented!()
    }
}

impl Algorithm<Item> for CountingXOR128 {
    fn hash(&mut self) -> Item {
        self.0.hash()
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn node(&mut self, left: &Item, right: &Item) -> Result<Item> {
        PAIR_HASHES.with(|c| c.set(c.get() + 1));
        self.0.node(left, right)
    }
}

/// Digest whose writes always fail.
#[derive(Debug, Clone, Default)]
pub struct FailingXOR128(XOR128);

impl Hasher for FailingXOR128 {
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes)
    }

    fn finish(&self) -> u64 {
        unimplemented!()
    }
}

impl Algorithm<Item> for FailingXOR128 {
    fn hash(&mut self) -> Item {
        self.0.hash()
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn try_write(&mut self, bytes: &[u8]) -> Result<()> {
        bail!("digest rejected write of {} bytes", bytes.len())
    }
}

thread_local! {
    static FAIL_AT_PAIR: Cell<usize> = Cell::new(usize::MAX);
}

/// Makes `FailingNthXOR128` reject the `n`th pair hash (1-based) on this
/// thread, counting from now.
pub fn fail_at_pair(n: usize) {
    FAIL_AT_PAIR.with(|c| c.set(n));
    reset_pair_hashes();
}

/// XOR128 rejecting one pair hash, chosen with `fail_at_pair`.
#[derive(Debug, Clone, Default)]
pub struct FailingNthXOR128(XOR128);

impl Hasher for FailingNthXOR128 {
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes)
    }

    fn finish(&self) -> u64 {
        unimplemented!()
    }
}

impl Algorithm<Item> for FailingNthXOR128 {
    fn hash(&mut self) -> Item {
        self.0.hash()
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn node(&mut self, left: &Item, right: &Item) -> Result<Item> {
        let n = PAIR_HASHES.with(|c| {
            c.set(c.get() + 1);
            c.get()
        });
        if n == FAIL_AT_PAIR.with(|c| c.get()) {
            bail!("digest rejected pair {}", n);
        }
        self.0.node(left, right)
    }
}

pub fn item(n: u8) -> Item {
    let mut x = [0u8; SIZE];
    x[0] = n;
    x
}

pub fn get_vec_tree_from_slice(leafs: usize, options: Options) -> MerkleTree<Item, XOR128> {
    let mut x = Vec::with_capacity(leafs);
    for i in 0..leafs {
        x.push(i * 93);
    }
    MerkleTree::from_data(x, options).expect("failed to create tree from slice")
}
