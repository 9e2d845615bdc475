//! Binary Merkle proof verification over keccak256.
//!
//! Independent of the lottery lifecycle. Parents are `H(left || right)`.
//! [`verify`] takes the leaf position to decide each concatenation order,
//! while [`verify_by_sorting`] expects trees built with sorted pairs.

use sha3::{Digest, Keccak256};

pub type Hash = [u8; 32];

pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn hash_leaf(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Walks `proof` from `leaf` to the root. Bit `i` of `index` set means the
/// running hash is the right child at level `i`.
pub fn verify(proof: &[Hash], root: &Hash, leaf: &Hash, index: u64) -> bool {
    let mut computed = *leaf;
    let mut path = index;
    for node in proof {
        computed = if path & 1 == 0 {
            hash_pair(&computed, node)
        } else {
            hash_pair(node, &computed)
        };
        path >>= 1;
    }
    computed == *root
}

pub fn verify_by_sorting(proof: &[Hash], root: &Hash, leaf: &Hash) -> bool {
    let computed = proof.iter().fold(*leaf, |computed, node| {
        if computed <= *node {
            hash_pair(&computed, node)
        } else {
            hash_pair(node, &computed)
        }
    });
    computed == *root
}
