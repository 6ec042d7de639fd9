use super::*;

crate::impl_ssz_container! {
    /// Defined in consensus-specs [v1.4.0](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/beacon-chain.md#beaconblockheader).
    ///
    /// `state_root` is only meaningful once patched with the root of the state
    /// committing to the block, see [`BeaconBlockHeader::set_state_root`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct BeaconBlockHeader {
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub slot: Slot,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub proposer_index: ValidatorIndex,
        #[serde(rename = "parent_root")]
        pub parent_block_root: Root,
        pub state_root: Root,
        pub body_root: Root,
    }
}

impl BeaconBlockHeader {
    pub const FIELD_COUNT: usize = 5;

    pub fn new(
        slot: Slot,
        proposer_index: ValidatorIndex,
        parent_block_root: Root,
        state_root: Root,
        body_root: Root,
    ) -> Self {
        Self {
            slot,
            proposer_index,
            parent_block_root,
            state_root,
            body_root,
        }
    }

    pub fn set_state_root(&mut self, state_root: Root) {
        self.state_root = state_root;
    }

    /// Roots of the fields in declaration order, i.e. the leaves of the header tree.
    pub fn field_roots(&self) -> [Root; Self::FIELD_COUNT] {
        [
            self.slot.tree_hash_root(),
            self.proposer_index.tree_hash_root(),
            self.parent_block_root,
            self.state_root,
            self.body_root,
        ]
    }

    /// Inclusion proof of the field at `field_index` against [`TreeHash::tree_hash_root`].
    ///
    /// Returns the leaf, its branch and the generalized index.
    pub fn prove_field(&self, field_index: usize) -> Option<(Root, Vec<Root>, u64)> {
        if field_index >= Self::FIELD_COUNT {
            return None;
        }

        let roots = self.field_roots();
        let leaves = roots.iter().map(|root| root.0).collect::<Vec<_>>();
        let tree = merkle::MerkleTree::new(&leaves);
        let branch = tree.proof(field_index)?;
        let generalized_index = tree.generalized_index(field_index)?;

        Some((roots[field_index], branch, generalized_index))
    }
}

impl From<&BeaconBlock> for BeaconBlockHeader {
    fn from(block: &BeaconBlock) -> Self {
        block.header()
    }
}
