use super::*;

crate::impl_ssz_container! {
    /// Defined in consensus-specs [v1.4.0](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/deneb/beacon-chain.md#executionpayload).
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct ExecutionPayload {
        pub parent_hash: Bytes32,
        pub fee_recipient: Address,
        pub state_root: Bytes32,
        pub receipts_root: Bytes32,
        pub logs_bloom: LogsBloom,
        pub prev_randao: Bytes32,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub block_number: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub gas_limit: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub gas_used: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub timestamp: u64,
        pub extra_data: base_types::ByteList<MAX_EXTRA_DATA_BYTES>,
        #[serde(deserialize_with = "utils::deserialize_u256", serialize_with = "utils::serialize_u256")]
        pub base_fee_per_gas: U256,
        pub block_hash: Bytes32,
        pub transactions: Transactions,
        pub withdrawals: Withdrawals,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub blob_gas_used: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub excess_blob_gas: u64,
    }
}

crate::impl_ssz_container! {
    /// Defined in consensus-specs [v1.4.0](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/deneb/beacon-chain.md#executionpayloadheader).
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct ExecutionPayloadHeader {
        pub parent_hash: Bytes32,
        pub fee_recipient: Address,
        pub state_root: Bytes32,
        pub receipts_root: Bytes32,
        pub logs_bloom: LogsBloom,
        pub prev_randao: Bytes32,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub block_number: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub gas_limit: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub gas_used: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub timestamp: u64,
        pub extra_data: base_types::ByteList<MAX_EXTRA_DATA_BYTES>,
        #[serde(deserialize_with = "utils::deserialize_u256", serialize_with = "utils::serialize_u256")]
        pub base_fee_per_gas: U256,
        pub block_hash: Bytes32,
        pub transactions_root: Root,
        pub withdrawals_root: Root,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub blob_gas_used: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub excess_blob_gas: u64,
    }
}

impl From<&ExecutionPayload> for ExecutionPayloadHeader {
    fn from(payload: &ExecutionPayload) -> Self {
        Self {
            parent_hash: payload.parent_hash,
            fee_recipient: payload.fee_recipient,
            state_root: payload.state_root,
            receipts_root: payload.receipts_root,
            logs_bloom: payload.logs_bloom,
            prev_randao: payload.prev_randao,
            block_number: payload.block_number,
            gas_limit: payload.gas_limit,
            gas_used: payload.gas_used,
            timestamp: payload.timestamp,
            extra_data: payload.extra_data.clone(),
            base_fee_per_gas: payload.base_fee_per_gas,
            block_hash: payload.block_hash,
            transactions_root: payload.transactions.tree_hash_root(),
            withdrawals_root: payload.withdrawals.tree_hash_root(),
            blob_gas_used: payload.blob_gas_used,
            excess_blob_gas: payload.excess_blob_gas,
        }
    }
}
