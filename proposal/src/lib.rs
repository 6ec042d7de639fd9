//! ABCI adapter carrying beacon blocks inside consensus engine proposals.
//!
//! On the proposer side [`Handler::prepare_proposal`] builds a block and
//! inserts its encoding into the outgoing transaction list. Every validator
//! then runs [`Handler::process_proposal`] which extracts the block, hands it
//! to the [`BlockReceiver`] and passes the remaining transactions on.

mod config;
mod error;
mod handler;
pub mod state;
pub mod txs;
mod types;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use types::{
    PrepareProposalRequest, PrepareProposalResponse, ProcessProposalRequest,
    ProcessProposalResponse, ProposalStatus,
};

use consensus_types::{beacon::BeaconBlock, Slot};

/// Synchronization state of the node as reported by the initial sync service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SyncStatus {
    #[display(fmt = "synced")]
    Synced,
    /// Execution client has blocks the consensus side has not processed yet.
    #[display(fmt = "execution ahead")]
    ExecutionAhead,
    #[display(fmt = "not synced")]
    NotSynced,
}

pub trait SyncStatusSource {
    fn sync_status(&self) -> SyncStatus;
}

pub trait BeaconBlockBuilder {
    /// Best block available for `slot`, either cached or freshly built.
    /// `None` means the builder has nothing to propose.
    fn request_best_block(&self, slot: Slot) -> anyhow::Result<Option<BeaconBlock>>;
}

/// Full state transition validation of a proposed block.
pub trait BlockReceiver {
    fn receive_beacon_block(&self, block: &BeaconBlock) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests;
