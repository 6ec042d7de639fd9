use super::*;

pub type Bytes32 = base_types::BytesFixed<32>;
pub type Address = base_types::BytesFixed<20>;
pub type LogsBloom = base_types::BytesFixed<256>;
pub type Transaction = base_types::ByteList<1_073_741_824>;
pub type SignatureBytes = base_types::BytesFixed<96>;
pub type BLSPubKey = base_types::BytesFixed<48>;
pub type KzgCommitment = base_types::BytesFixed<48>;

pub const MAX_EXTRA_DATA_BYTES: usize = 32;
pub const MAX_TRANSACTIONS_PER_PAYLOAD: usize = 1_048_576;
pub const MAX_WITHDRAWALS_PER_PAYLOAD: usize = 16;
pub const MAX_DEPOSITS: usize = 16;
pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: usize = 4_096;
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;

pub type Transactions = base_types::List<Transaction, MAX_TRANSACTIONS_PER_PAYLOAD>;
pub type Withdrawals = base_types::List<Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD>;

crate::impl_ssz_container! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct Withdrawal {
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub index: u64,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub validator_index: u64,
        pub address: Address,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub amount: u64,
    }
}

crate::impl_ssz_container! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct Eth1Data {
        pub deposit_root: Bytes32,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub deposit_count: u64,
        pub block_hash: Bytes32,
    }
}

crate::impl_ssz_container! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct DepositData {
        pub pubkey: BLSPubKey,
        pub withdrawal_credentials: Bytes32,
        #[serde(deserialize_with = "utils::deserialize_u64", serialize_with = "utils::serialize_u64")]
        pub amount: u64,
        pub signature: SignatureBytes,
    }
}

crate::impl_ssz_container! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct Deposit {
        pub proof: base_types::FixedArray<Bytes32, { DEPOSIT_CONTRACT_TREE_DEPTH + 1 }>,
        pub data: DepositData,
    }
}
