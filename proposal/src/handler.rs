use super::*;
use consensus_types::chain_spec::ChainSpec;

const PREPARE_TARGET: &str = "prepare-proposal";
const PROCESS_TARGET: &str = "process-proposal";

pub struct Handler<S, B, R> {
    config: Config,
    chain_spec: ChainSpec,
    sync_status: S,
    builder: B,
    receiver: R,
}

impl<S, B, R> Handler<S, B, R>
where
    S: SyncStatusSource,
    B: BeaconBlockBuilder,
    R: BlockReceiver,
{
    pub fn new(
        config: Config,
        chain_spec: ChainSpec,
        sync_status: S,
        builder: B,
        receiver: R,
    ) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            chain_spec,
            sync_status,
            builder,
            receiver,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the block for `request.height`, runs `next` and inserts the
    /// encoded block into its transactions at the configured position.
    pub fn prepare_proposal<F>(
        &self,
        request: PrepareProposalRequest,
        next: F,
    ) -> Result<PrepareProposalResponse, Error>
    where
        F: FnOnce(PrepareProposalRequest) -> anyhow::Result<PrepareProposalResponse>,
    {
        let result = self.try_prepare_proposal(request, next);
        if let Err(e) = &result {
            log::error!(target: PREPARE_TARGET, "Failed to prepare proposal: {e}");
        }

        result
    }

    fn try_prepare_proposal<F>(
        &self,
        request: PrepareProposalRequest,
        next: F,
    ) -> Result<PrepareProposalResponse, Error>
    where
        F: FnOnce(PrepareProposalRequest) -> anyhow::Result<PrepareProposalResponse>,
    {
        let status = self.sync_status.sync_status();
        if status == SyncStatus::ExecutionAhead {
            return Err(Error::ValidatorClientNotSynced(status));
        }

        let slot = request.height;
        let block = self
            .builder
            .request_best_block(slot)
            .map_err(Error::BuildBlock)?
            .ok_or(Error::NilBlock(slot))?;
        let encoded = block.marshal_ssz();

        log::debug!(
            target: PREPARE_TARGET,
            "Built block for slot #{slot}: {} byte(s), root = {:?}",
            encoded.len(),
            consensus_types::tree_hash::TreeHash::tree_hash_root(&block)
        );

        let mut response = next(request).map_err(Error::NextHandler)?;
        txs::insert_at(&mut response.txs, self.config.beacon_block_position, encoded)?;

        Ok(response)
    }

    /// Validates the beacon block carried by the proposal and runs `next`
    /// with the block removed.
    ///
    /// Every failure rejects the proposal. The receiver is not called unless
    /// the node is synced and the block decodes.
    pub fn process_proposal<F>(
        &self,
        request: ProcessProposalRequest,
        next: F,
    ) -> ProcessProposalResponse
    where
        F: FnOnce(ProcessProposalRequest) -> anyhow::Result<ProcessProposalResponse>,
    {
        match self.try_process_proposal(request, next) {
            Ok(response) => response,
            Err(e) => {
                log::error!(target: PROCESS_TARGET, "Rejecting proposal: {e}");

                ProcessProposalResponse::Reject(e)
            }
        }
    }

    fn try_process_proposal<F>(
        &self,
        mut request: ProcessProposalRequest,
        next: F,
    ) -> Result<ProcessProposalResponse, Error>
    where
        F: FnOnce(ProcessProposalRequest) -> anyhow::Result<ProcessProposalResponse>,
    {
        let status = self.sync_status.sync_status();
        if status != SyncStatus::Synced {
            return Err(Error::ClientNotSynced(status));
        }

        let fork_version = self.chain_spec.fork_version_at_slot(request.height);
        let encoded = txs::get_at(&request.txs, self.config.beacon_block_position)?;
        let block = BeaconBlock::from_ssz_bytes(encoded, fork_version)?;

        self.receiver
            .receive_beacon_block(&block)
            .map_err(Error::ReceiveBlock)?;

        log::debug!(
            target: PROCESS_TARGET,
            "Accepted block for slot #{} proposed by #{}",
            block.slot(),
            block.proposer_index()
        );

        self.remove_beacon_block_from_txs(&mut request)?;

        next(request).map_err(Error::NextHandler)
    }

    /// Drops the beacon block entry keeping the order of the other transactions.
    pub fn remove_beacon_block_from_txs(
        &self,
        request: &mut ProcessProposalRequest,
    ) -> Result<Vec<u8>, Error> {
        txs::remove_at(&mut request.txs, self.config.beacon_block_position)
    }
}
