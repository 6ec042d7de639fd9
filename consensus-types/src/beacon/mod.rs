//! Fork-versioned beacon chain entities. Inspired by
//! <https://github.com/a16z/helios> and <https://github.com/sigp/lighthouse/> projects.

use super::*;

mod block;
mod body;
mod common;
mod execution_payload;
mod header;

pub use block::{BeaconBlock, BeaconBlockDeneb};
pub use body::BeaconBlockBodyDeneb;
pub use common::*;
pub use execution_payload::{ExecutionPayload, ExecutionPayloadHeader};
pub use header::BeaconBlockHeader;

/// Numeric fork tags. The tag is external context: it is never embedded in
/// the encoding of a block.
pub mod version {
    use crate::ForkVersion;

    pub const PHASE0: ForkVersion = 0;
    pub const ALTAIR: ForkVersion = 1;
    pub const BELLATRIX: ForkVersion = 2;
    pub const CAPELLA: ForkVersion = 3;
    pub const DENEB: ForkVersion = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ForkName {
    #[display(fmt = "phase0")]
    Phase0,
    #[display(fmt = "altair")]
    Altair,
    #[display(fmt = "bellatrix")]
    Bellatrix,
    #[display(fmt = "capella")]
    Capella,
    #[display(fmt = "deneb")]
    Deneb,
}

impl ForkName {
    pub fn from_version(fork_version: ForkVersion) -> Option<Self> {
        Some(match fork_version {
            version::PHASE0 => Self::Phase0,
            version::ALTAIR => Self::Altair,
            version::BELLATRIX => Self::Bellatrix,
            version::CAPELLA => Self::Capella,
            version::DENEB => Self::Deneb,
            _ => return None,
        })
    }

    pub fn version(&self) -> ForkVersion {
        match self {
            Self::Phase0 => version::PHASE0,
            Self::Altair => version::ALTAIR,
            Self::Bellatrix => version::BELLATRIX,
            Self::Capella => version::CAPELLA,
            Self::Deneb => version::DENEB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("fork version {0} is not supported")]
    ForkVersionNotSupported(ForkVersion),
    #[error("failed to decode block: {0}")]
    Decode(#[from] DecodeError),
}
