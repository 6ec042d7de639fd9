use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareProposalRequest {
    /// Height of the proposal, equal to the slot of the block being built.
    pub height: Slot,
    pub txs: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareProposalResponse {
    pub txs: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessProposalRequest {
    pub height: Slot,
    pub txs: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ProposalStatus {
    #[display(fmt = "ACCEPT")]
    Accept,
    #[display(fmt = "REJECT")]
    Reject,
}

#[derive(Debug)]
pub enum ProcessProposalResponse {
    Accept,
    Reject(Error),
}

impl ProcessProposalResponse {
    pub fn status(&self) -> ProposalStatus {
        match self {
            Self::Accept => ProposalStatus::Accept,
            Self::Reject(_) => ProposalStatus::Reject,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Accept => None,
            Self::Reject(e) => Some(e),
        }
    }
}
