//! Hash-tree-root of SSZ values. Inspired by <https://github.com/sigp/tree_hash>.

use super::*;
use hasher::Chunk;

pub const BYTES_PER_CHUNK: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeHashType {
    Basic,
    Vector,
    List,
    Container,
}

pub trait TreeHash {
    fn tree_hash_type() -> TreeHashType;

    /// Little-endian bytes packed into chunks when the value is an element of
    /// a basic-type collection. Composite values pack as their root.
    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        self.tree_hash_root().as_bytes().to_vec()
    }

    /// How many values fit into one chunk.
    fn tree_hash_packing_factor() -> usize {
        1
    }

    fn tree_hash_root(&self) -> Root;
}

fn basic_root(bytes: &[u8]) -> Root {
    let mut chunk: Chunk = hasher::ZERO_CHUNK;
    chunk[..bytes.len()].copy_from_slice(bytes);

    H256(chunk)
}

macro_rules! impl_tree_hash_uint {
    ($type:ty) => {
        impl TreeHash for $type {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn tree_hash_packing_factor() -> usize {
                BYTES_PER_CHUNK / core::mem::size_of::<$type>()
            }

            fn tree_hash_root(&self) -> Root {
                basic_root(&self.to_le_bytes())
            }
        }
    };
}

impl_tree_hash_uint!(u8);
impl_tree_hash_uint!(u64);

impl TreeHash for bool {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        vec![*self as u8]
    }

    fn tree_hash_packing_factor() -> usize {
        BYTES_PER_CHUNK
    }

    fn tree_hash_root(&self) -> Root {
        basic_root(&[*self as u8])
    }
}

impl TreeHash for U256 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        let mut bytes = [0u8; 32];
        self.to_little_endian(&mut bytes);

        bytes.to_vec()
    }

    fn tree_hash_root(&self) -> Root {
        let mut bytes = [0u8; 32];
        self.to_little_endian(&mut bytes);

        H256(bytes)
    }
}

impl TreeHash for H256 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_root(&self) -> Root {
        *self
    }
}

/// Root of a homogeneous collection able to hold up to `N` values, without
/// the length mix-in.
pub fn vec_tree_hash_root<T, const N: usize>(items: &[T]) -> Root
where
    T: TreeHash,
{
    match T::tree_hash_type() {
        TreeHashType::Basic => {
            let packing_factor = T::tree_hash_packing_factor();
            let bytes = items
                .iter()
                .flat_map(|item| item.tree_hash_packed_encoding())
                .collect::<Vec<_>>();
            let chunks = merkle::pack_bytes(&bytes);

            H256(merkle::merkleize_padded_with::<hasher::Sha256Hasher>(
                &chunks,
                N.div_ceil(packing_factor),
            ))
        }

        TreeHashType::Container | TreeHashType::List | TreeHashType::Vector => {
            let chunks = items
                .iter()
                .map(|item| item.tree_hash_root().0)
                .collect::<Vec<_>>();

            H256(merkle::merkleize_padded_with::<hasher::Sha256Hasher>(
                &chunks, N,
            ))
        }
    }
}

/// Root of a byte string bounded to `N` bytes, without the length mix-in.
pub fn bytes_tree_hash_root<const N: usize>(bytes: &[u8]) -> Root {
    let chunks = merkle::pack_bytes(bytes);

    H256(merkle::merkleize_padded_with::<hasher::Sha256Hasher>(
        &chunks,
        N.div_ceil(BYTES_PER_CHUNK),
    ))
}
