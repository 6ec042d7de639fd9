//! Merkleization of chunk sequences and Merkle proof verification.

use super::*;
use hasher::{Chunk, Hasher, Sha256Hasher, ZERO_CHUNK};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerkleizationError {
    #[error("{count} chunks exceed the limit of {limit}")]
    TooManyChunks { count: usize, limit: usize },
}

/// Depth of the smallest balanced tree holding `leaves` leaves.
pub fn depth_for(leaves: usize) -> usize {
    leaves.max(1).next_power_of_two().trailing_zeros() as usize
}

/// Splits `bytes` into 32-byte chunks, right-padding the last one with zeros.
pub fn pack_bytes(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(tree_hash::BYTES_PER_CHUNK)
        .map(|piece| {
            let mut chunk = ZERO_CHUNK;
            chunk[..piece.len()].copy_from_slice(piece);

            chunk
        })
        .collect()
}

/// Root of the tree over `chunks` padded with zero chunks up to the next power of two.
///
/// The tree is virtually extended to hold `limit` leaves, zero subtrees are
/// hashed on the fly so large limits cost `O(depth)` extra hashes. A `limit`
/// smaller than the chunk count is treated as the chunk count.
pub fn merkleize_padded_with<H: Hasher>(chunks: &[Chunk], limit: usize) -> Chunk {
    let depth = depth_for(limit.max(chunks.len()));

    let mut layer = chunks.to_vec();
    let mut zero = ZERO_CHUNK;
    for _ in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(zero);
        }

        layer = layer
            .chunks_exact(2)
            .map(|pair| H::combine(&pair[0], &pair[1]))
            .collect();
        zero = H::combine(&zero, &zero);
    }

    layer.first().copied().unwrap_or(zero)
}

/// Root of a balanced tree over `chunks`. Empty input yields the zero chunk.
pub fn merkleize(chunks: &[Chunk]) -> Root {
    H256(merkleize_padded_with::<Sha256Hasher>(chunks, chunks.len()))
}

/// Root of a tree over `chunks` sized for `limit` leaves.
pub fn merkleize_with_limit(chunks: &[Chunk], limit: usize) -> Result<Root, MerkleizationError> {
    if chunks.len() > limit {
        return Err(MerkleizationError::TooManyChunks {
            count: chunks.len(),
            limit,
        });
    }

    Ok(H256(merkleize_padded_with::<Sha256Hasher>(chunks, limit)))
}

/// Root of a container, i.e. the balanced tree over its field roots.
pub fn merkleize_roots(roots: &[Root]) -> Root {
    let chunks = roots.iter().map(|root| root.0).collect::<Vec<_>>();

    merkleize(&chunks)
}

/// Generalized index of the node at `index` within level `depth`, `None` if
/// it doesn't fit into a `u64`.
pub fn generalized_index(depth: usize, index: u64) -> Option<u64> {
    let base = u32::try_from(depth)
        .ok()
        .and_then(|depth| 1u64.checked_shl(depth))?;
    if index >= base {
        return None;
    }

    Some(base + index)
}

/// Fully materialized balanced Merkle tree able to produce inclusion proofs.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    // layers[0] holds the padded leaves, the last layer holds the root only.
    layers: Vec<Vec<Chunk>>,
}

impl MerkleTree {
    pub fn new(leaves: &[Chunk]) -> Self {
        let depth = depth_for(leaves.len());

        let mut layer = leaves.to_vec();
        layer.resize(1 << depth, ZERO_CHUNK);

        let mut layers = Vec::with_capacity(depth + 1);
        for _ in 0..depth {
            let next = layer
                .chunks_exact(2)
                .map(|pair| Sha256Hasher::combine(&pair[0], &pair[1]))
                .collect();
            layers.push(layer);
            layer = next;
        }
        layers.push(layer);

        Self { layers }
    }

    pub fn root(&self) -> Root {
        H256(self.layers[self.layers.len() - 1][0])
    }

    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Sibling nodes from the leaf at `index` up to (excluding) the root.
    pub fn proof(&self, index: usize) -> Option<Vec<Root>> {
        if index >= self.layers[0].len() {
            return None;
        }

        let mut position = index;
        let branch = self.layers[..self.depth()]
            .iter()
            .map(|layer| {
                let sibling = layer[position ^ 1];
                position >>= 1;

                H256(sibling)
            })
            .collect();

        Some(branch)
    }

    pub fn generalized_index(&self, index: usize) -> Option<u64> {
        generalized_index(self.depth(), index as u64)
    }
}

/// Computes the root implied by `leaf` and its `branch`.
///
/// Bit `i` of `index` tells whether `branch[i]` is the left (1) or the right (0) sibling.
pub fn root_from_branch(leaf: &Root, branch: &[Root], index: u64) -> Root {
    let value = branch
        .iter()
        .enumerate()
        .fold(leaf.0, |value, (i, node)| match (index >> i) & 1 {
            1 => Sha256Hasher::combine(&node.0, &value),
            _ => Sha256Hasher::combine(&value, &node.0),
        });

    H256(value)
}

/// Defined in consensus-specs [v1.4.0](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/beacon-chain.md#is_valid_merkle_branch).
pub fn is_valid_merkle_branch(
    leaf: &Root,
    branch: &[Root],
    depth: usize,
    index: u64,
    root: &Root,
) -> bool {
    if branch.len() != depth {
        return false;
    }

    root_from_branch(leaf, branch, index) == *root
}

/// Verifies `leaf` against `root` at the position encoded by `generalized_index`.
///
/// Never fails: a malformed proof is an invalid one.
pub fn verify_proof(root: &Root, leaf: &Root, generalized_index: u64, branch: &[Root]) -> bool {
    if branch.len() > u8::MAX as usize || generalized_index == 0 {
        return false;
    }

    let depth = generalized_index.ilog2() as usize;

    is_valid_merkle_branch(leaf, branch, depth, generalized_index, root)
}
