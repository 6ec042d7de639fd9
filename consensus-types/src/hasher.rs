//! Hashing primitive used by merkleization and proof verification.

use super::*;
use sha2::{Digest, Sha256};

/// A single 32-byte node of a Merkle tree.
pub type Chunk = [u8; 32];

pub const ZERO_CHUNK: Chunk = [0u8; 32];

/// Hash function turning two nodes into their parent.
///
/// Only `hash` has to be provided. Consensus roots are defined over SHA-256
/// so [`Sha256Hasher`] is the one used by the [`TreeHash`] implementations.
pub trait Hasher {
    fn hash(data: &[u8]) -> Chunk;

    /// Hash of the 64-byte concatenation `a || b`.
    fn combine(a: &Chunk, b: &Chunk) -> Chunk {
        let mut input = [0u8; 64];
        input[..32].copy_from_slice(a);
        input[32..].copy_from_slice(b);

        Self::hash(&input)
    }

    /// Hash of `root` followed by `length` as a 32-byte little-endian field.
    fn mix_in(root: &Chunk, length: u64) -> Chunk {
        let mut length_chunk = ZERO_CHUNK;
        length_chunk[..8].copy_from_slice(&length.to_le_bytes());

        Self::combine(root, &length_chunk)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(data: &[u8]) -> Chunk {
        let digest = Sha256::digest(data);

        let mut chunk = ZERO_CHUNK;
        chunk.copy_from_slice(digest.as_slice());

        chunk
    }
}

pub fn hash_combine(a: &Root, b: &Root) -> Root {
    H256(Sha256Hasher::combine(&a.0, &b.0))
}

pub fn mix_in_length(root: &Root, length: usize) -> Root {
    H256(Sha256Hasher::mix_in(&root.0, length as u64))
}
