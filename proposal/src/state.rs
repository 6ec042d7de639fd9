//! Access to the beacon state needed by proof surfaces.

use consensus_types::{beacon::BeaconBlockHeader, Root};

pub trait BeaconStateReader {
    /// Latest block header as stored in the state, i.e. with a zero state root.
    fn latest_block_header(&self) -> anyhow::Result<BeaconBlockHeader>;

    fn hash_tree_root(&self) -> anyhow::Result<Root>;
}

/// Latest block header with its state root patched from `state`.
pub fn latest_block_header<S: BeaconStateReader>(state: &S) -> anyhow::Result<BeaconBlockHeader> {
    let mut header = state.latest_block_header()?;
    header.set_state_root(state.hash_tree_root()?);

    Ok(header)
}
