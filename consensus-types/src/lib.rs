#![cfg_attr(not(feature = "std"), no_std)]

pub mod base_types;
pub mod beacon;
pub mod chain_spec;
pub mod hasher;
pub mod merkle;
pub mod payload;
pub mod ssz;
pub mod tree_hash;
pub mod utils;

extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec, vec::Vec};
use core::{
    any,
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Deref, Index, IndexMut, Range},
    slice::SliceIndex,
};

pub use ethereum_types::{H160, H256, U256};
use serde::{de, Deserialize, Serialize};
use ssz::{DecodeError, Ssz};
use tree_hash::{TreeHash, TreeHashType};

/// 32-byte commitment produced by hashing and merkleization.
pub type Root = H256;
pub type Slot = u64;
pub type Epoch = u64;
pub type ValidatorIndex = u64;

/// Numeric tag of a protocol revision, see [`beacon::version`].
pub type ForkVersion = u32;

pub const SLOTS_PER_EPOCH: u64 = 32;
