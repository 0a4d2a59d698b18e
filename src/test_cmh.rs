#![cfg(test)]

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::hash::Algorithm;
use crate::merkle::MerkleTree;
use crate::options::Options;
use crate::proof::verify;

type Item = [u8; 8];

/// Custom merkle hasher: SipHash with fixed keys, order sensitive.
#[derive(Debug, Clone, Default)]
struct CMH(DefaultHasher);

impl Hasher for CMH {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.0.write(msg)
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0.finish()
    }
}

impl Algorithm<Item> for CMH {
    #[inline]
    fn hash(&mut self) -> Item {
        self.finish().to_be_bytes()
    }

    #[inline]
    fn reset(&mut self) {
        *self = CMH::default()
    }
}

fn tree(data: &[u64], options: Options) -> MerkleTree<Item, CMH> {
    MerkleTree::from_data(data.iter(), options).unwrap()
}

fn flip(mut el: Item, byte: usize, bit: u8) -> Item {
    el[byte] ^= 1 << bit;
    el
}

#[test]
fn test_permutation_invariance() {
    let mut data: Vec<u64> = (0..13).collect();
    let expected = tree(&data, Options::sorted());

    let mut rng = thread_rng();
    for _ in 0..20 {
        data.shuffle(&mut rng);
        let t = tree(&data, Options::sorted());
        assert_eq!(t.root(), expected.root());
        assert_eq!(t.leaves(), expected.leaves());

        let t = tree(&data, Options::default().with_sort_leaves(true));
        assert_eq!(
            t.root(),
            tree(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12], Options::new(true, false)).root()
        );
    }
}

#[test]
fn test_permutation_sensitivity() {
    let original = tree(&[1, 2, 3], Options::default());
    let swapped = tree(&[2, 1, 3], Options::default());
    let rotated = tree(&[3, 1, 2], Options::default());

    assert_ne!(original.root(), swapped.root());
    assert_ne!(original.root(), rotated.root());
}

#[test]
fn test_sorted_pairs_roundtrip() {
    let mut rng = thread_rng();
    for leafs in 1..=17u64 {
        let mut data: Vec<u64> = (100..100 + leafs).collect();
        data.shuffle(&mut rng);

        for options in [Options::new(false, true), Options::sorted()] {
            let t = tree(&data, options);
            let root = t.root();

            for leaf in t.leaves() {
                let p = t.proof(&leaf).unwrap();
                assert!(verify::<_, CMH>(&root, &leaf, Some(p.siblings())));
                assert!(p.validate::<CMH>(&leaf, &root, true));
            }
        }
    }
}

#[test]
fn test_tamper_sensitivity() {
    let t = tree(&[10, 20, 30, 40, 50, 60], Options::sorted());
    let root = t.root();

    for leaf in t.leaves() {
        let p = t.proof(&leaf).unwrap().into_inner();
        assert!(verify::<_, CMH>(&root, &leaf, Some(&p[..])));

        for byte in 0..8 {
            for bit in 0..8 {
                assert!(!verify::<_, CMH>(&root, &flip(leaf, byte, bit), Some(&p[..])));
                assert!(!verify::<_, CMH>(&flip(root, byte, bit), &leaf, Some(&p[..])));

                for i in 0..p.len() {
                    let mut bad = p.clone();
                    bad[i] = flip(bad[i], byte, bit);
                    assert!(!verify::<_, CMH>(&root, &leaf, Some(&bad[..])));
                }
            }
        }
    }
}

#[test]
fn test_unsorted_pairs_need_positional_validation() {
    let mut leaves = tree(&[1, 2], Options::default()).leaves();
    // Larger digest first, so that scan order and byte order disagree.
    leaves.sort();
    leaves.reverse();

    let t: MerkleTree<Item, CMH> = MerkleTree::new(leaves.clone(), Options::default()).unwrap();
    let root = t.root();
    for leaf in &leaves {
        let p = t.proof(leaf).unwrap();
        assert!(!verify::<_, CMH>(&root, leaf, Some(p.siblings())));
        assert!(p.validate::<CMH>(leaf, &root, false));
    }

    let t: MerkleTree<Item, CMH> =
        MerkleTree::new(leaves.clone(), Options::new(false, true)).unwrap();
    let root = t.root();
    for leaf in &leaves {
        assert!(verify::<_, CMH>(&root, leaf, t.proof(leaf).as_deref()));
    }
}

#[test]
fn test_string_boundaries_in_leaves() {
    let leaf = |t: MerkleTree<Item, CMH>| t.root();

    let split1 = leaf(MerkleTree::from_data(vec![vec!["ab", "c"]], Options::default()).unwrap());
    let split2 = leaf(MerkleTree::from_data(vec![vec!["a", "bc"]], Options::default()).unwrap());
    assert_ne!(split1, split2);

    let split1 = leaf(MerkleTree::from_data(vec![("ab", "c")], Options::default()).unwrap());
    let split2 = leaf(MerkleTree::from_data(vec![("a", "bc")], Options::default()).unwrap());
    assert_ne!(split1, split2);

    // A plain string leaf is the digest of its bytes.
    let mut a = CMH::default();
    a.write(b"abc");
    assert_eq!(leaf(MerkleTree::from_data(vec!["abc"], Options::default()).unwrap()), a.hash());
}
