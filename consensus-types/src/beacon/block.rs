use super::*;

crate::impl_ssz_container! {
    /// Defined in consensus-specs [v1.4.0](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/beacon-chain.md#beaconblock).
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct BeaconBlockDeneb {
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub slot: Slot,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub proposer_index: ValidatorIndex,
        #[serde(rename = "parent_root")]
        pub parent_block_root: Root,
        pub state_root: Root,
        pub body: BeaconBlockBodyDeneb,
    }
}

/// Beacon block of any supported fork.
///
/// The fork is never part of the encoding so decoding requires it as an
/// explicit argument. Unknown fork versions are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeaconBlock {
    Deneb(BeaconBlockDeneb),
}

impl BeaconBlock {
    /// Zero-valued block of the given fork.
    pub fn empty(fork_version: ForkVersion) -> Result<Self, Error> {
        match ForkName::from_version(fork_version) {
            Some(ForkName::Deneb) => Ok(Self::Deneb(BeaconBlockDeneb::default())),
            _ => Err(Error::ForkVersionNotSupported(fork_version)),
        }
    }

    pub fn new_with_version(
        slot: Slot,
        proposer_index: ValidatorIndex,
        parent_block_root: Root,
        fork_version: ForkVersion,
    ) -> Result<Self, Error> {
        let mut block = Self::empty(fork_version)?;
        match &mut block {
            Self::Deneb(inner) => {
                inner.slot = slot;
                inner.proposer_index = proposer_index;
                inner.parent_block_root = parent_block_root;
            }
        }

        Ok(block)
    }

    pub fn from_ssz_bytes(bytes: &[u8], fork_version: ForkVersion) -> Result<Self, Error> {
        match ForkName::from_version(fork_version) {
            Some(ForkName::Deneb) => Ok(Self::Deneb(BeaconBlockDeneb::unmarshal_ssz(bytes)?)),
            _ => Err(Error::ForkVersionNotSupported(fork_version)),
        }
    }

    pub fn version(&self) -> ForkVersion {
        self.fork_name().version()
    }

    pub fn fork_name(&self) -> ForkName {
        match self {
            Self::Deneb(_) => ForkName::Deneb,
        }
    }

    /// A constructed block always holds a variant. Absence of a block is
    /// expressed with `Option<BeaconBlock>`.
    pub fn is_nil(&self) -> bool {
        false
    }

    pub fn slot(&self) -> Slot {
        match self {
            Self::Deneb(inner) => inner.slot,
        }
    }

    pub fn proposer_index(&self) -> ValidatorIndex {
        match self {
            Self::Deneb(inner) => inner.proposer_index,
        }
    }

    pub fn parent_block_root(&self) -> Root {
        match self {
            Self::Deneb(inner) => inner.parent_block_root,
        }
    }

    pub fn state_root(&self) -> Root {
        match self {
            Self::Deneb(inner) => inner.state_root,
        }
    }

    pub fn set_state_root(&mut self, state_root: Root) {
        match self {
            Self::Deneb(inner) => inner.state_root = state_root,
        }
    }

    pub fn body(&self) -> &BeaconBlockBodyDeneb {
        match self {
            Self::Deneb(inner) => &inner.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut BeaconBlockBodyDeneb {
        match self {
            Self::Deneb(inner) => &mut inner.body,
        }
    }

    /// Standalone copy of the header fields with `body_root` computed from the body.
    pub fn header(&self) -> BeaconBlockHeader {
        match self {
            Self::Deneb(inner) => BeaconBlockHeader {
                slot: inner.slot,
                proposer_index: inner.proposer_index,
                parent_block_root: inner.parent_block_root,
                state_root: inner.state_root,
                body_root: inner.body.tree_hash_root(),
            },
        }
    }

    pub fn is_fixed_size(&self) -> bool {
        match self {
            Self::Deneb(_) => BeaconBlockDeneb::is_fixed_size(),
        }
    }

    pub fn size_ssz(&self) -> usize {
        match self {
            Self::Deneb(inner) => inner.size_ssz(),
        }
    }

    pub fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Deneb(inner) => inner.marshal_ssz_into(buf),
        }
    }

    pub fn marshal_ssz(&self) -> Vec<u8> {
        match self {
            Self::Deneb(inner) => inner.marshal_ssz(),
        }
    }
}

impl TreeHash for BeaconBlock {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Container
    }

    fn tree_hash_root(&self) -> Root {
        match self {
            Self::Deneb(inner) => inner.tree_hash_root(),
        }
    }
}

impl From<BeaconBlockDeneb> for BeaconBlock {
    fn from(block: BeaconBlockDeneb) -> Self {
        Self::Deneb(block)
    }
}
