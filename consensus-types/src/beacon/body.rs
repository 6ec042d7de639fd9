use super::*;

crate::impl_ssz_container! {
    /// Deneb block body as carried inside a consensus engine proposal.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct BeaconBlockBodyDeneb {
        pub randao_reveal: SignatureBytes,
        pub eth1_data: Eth1Data,
        pub graffiti: Bytes32,
        pub deposits: base_types::List<Deposit, MAX_DEPOSITS>,
        pub execution_payload: ExecutionPayload,
        pub blob_kzg_commitments: base_types::List<KzgCommitment, MAX_BLOB_COMMITMENTS_PER_BLOCK>,
    }
}
