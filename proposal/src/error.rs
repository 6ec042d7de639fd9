use super::*;
use consensus_types::beacon;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validator client is not synced: {0}")]
    ValidatorClientNotSynced(SyncStatus),
    #[error("Client is not synced: {0}")]
    ClientNotSynced(SyncStatus),
    #[error("Failed to build block: {0}")]
    BuildBlock(anyhow::Error),
    #[error("No block to propose for slot #{0}")]
    NilBlock(Slot),
    #[error("Failed to receive block: {0}")]
    ReceiveBlock(anyhow::Error),
    #[error("Invalid beacon block: {0}")]
    Block(#[from] beacon::Error),
    #[error("Position {position} is out of range for {len} transaction(s)")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("Next handler failed: {0}")]
    NextHandler(anyhow::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
