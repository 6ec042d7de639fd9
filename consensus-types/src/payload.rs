//! Conversion of an execution block as served by the engine API into the
//! [`ExecutionPayloadHeader`] committed to by the beacon chain.

use super::*;
use beacon::{
    Address, Bytes32, ExecutionPayloadHeader, LogsBloom, Withdrawal, MAX_EXTRA_DATA_BYTES,
    MAX_TRANSACTIONS_PER_PAYLOAD, MAX_WITHDRAWALS_PER_PAYLOAD,
};
use ethereum_types::Bloom;
use merkle::MerkleizationError;

/// Maximum length of a single transaction in bytes.
pub const MAX_BYTES_PER_TRANSACTION: usize = 1_073_741_824;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{count} transactions exceed the maximum of {max}", max = MAX_TRANSACTIONS_PER_PAYLOAD)]
    TooManyTransactions { count: usize },
    #[error("{count} withdrawals exceed the maximum of {max}", max = MAX_WITHDRAWALS_PER_PAYLOAD)]
    TooManyWithdrawals { count: usize },
    #[error("transaction {index} can't be merkleized: {source}")]
    Transaction {
        index: usize,
        source: MerkleizationError,
    },
    #[error("extra data of {len} bytes exceeds the maximum of {max}", max = MAX_EXTRA_DATA_BYTES)]
    ExtraDataTooLong { len: usize },
    #[error(transparent)]
    Merkleization(#[from] MerkleizationError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableWithdrawal {
    #[serde(with = "utils::quantity")]
    pub index: u64,
    #[serde(with = "utils::quantity")]
    pub validator_index: u64,
    pub address: H160,
    #[serde(with = "utils::quantity")]
    pub amount: u64,
}

impl From<&ExecutableWithdrawal> for Withdrawal {
    fn from(withdrawal: &ExecutableWithdrawal) -> Self {
        Self {
            index: withdrawal.index,
            validator_index: withdrawal.validator_index,
            address: Address::from(withdrawal.address.0),
            amount: withdrawal.amount,
        }
    }
}

/// Execution block in the engine API JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableData {
    pub parent_hash: H256,
    pub fee_recipient: H160,
    pub state_root: H256,
    pub receipts_root: H256,
    pub logs_bloom: Bloom,
    pub prev_randao: H256,
    #[serde(with = "utils::quantity")]
    pub number: u64,
    #[serde(with = "utils::quantity")]
    pub gas_limit: u64,
    #[serde(with = "utils::quantity")]
    pub gas_used: u64,
    #[serde(with = "utils::quantity")]
    pub timestamp: u64,
    #[serde(
        deserialize_with = "utils::decode_hex_bytes",
        serialize_with = "utils::serialize_hex_bytes"
    )]
    pub extra_data: Vec<u8>,
    pub base_fee_per_gas: U256,
    pub block_hash: H256,
    #[serde(
        deserialize_with = "utils::deserialize_hex_bytes_list",
        serialize_with = "utils::serialize_hex_bytes_list"
    )]
    pub transactions: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals: Option<Vec<ExecutableWithdrawal>>,
    #[serde(default, with = "utils::quantity_opt", skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<u64>,
    #[serde(default, with = "utils::quantity_opt", skip_serializing_if = "Option::is_none")]
    pub excess_blob_gas: Option<u64>,
}

/// Root of the `List[Transaction, MAX_TRANSACTIONS_PER_PAYLOAD]` holding `transactions`.
pub fn transactions_root(transactions: &[Vec<u8>]) -> Result<Root, Error> {
    if transactions.len() > MAX_TRANSACTIONS_PER_PAYLOAD {
        return Err(Error::TooManyTransactions {
            count: transactions.len(),
        });
    }

    let limit = MAX_BYTES_PER_TRANSACTION.div_ceil(tree_hash::BYTES_PER_CHUNK);
    let roots = transactions
        .iter()
        .enumerate()
        .map(|(index, transaction)| {
            let chunks = merkle::pack_bytes(transaction);
            let root = merkle::merkleize_with_limit(&chunks, limit)
                .map_err(|source| Error::Transaction { index, source })?;

            Ok(hasher::mix_in_length(&root, transaction.len()).0)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let root = merkle::merkleize_with_limit(&roots, MAX_TRANSACTIONS_PER_PAYLOAD)?;

    Ok(hasher::mix_in_length(&root, transactions.len()))
}

/// Root of the `List[Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD]` holding `withdrawals`.
pub fn withdrawals_root(withdrawals: &[ExecutableWithdrawal]) -> Result<Root, Error> {
    if withdrawals.len() > MAX_WITHDRAWALS_PER_PAYLOAD {
        return Err(Error::TooManyWithdrawals {
            count: withdrawals.len(),
        });
    }

    let roots = withdrawals
        .iter()
        .map(|withdrawal| Withdrawal::from(withdrawal).tree_hash_root().0)
        .collect::<Vec<_>>();
    let root = merkle::merkleize_with_limit(&roots, MAX_WITHDRAWALS_PER_PAYLOAD)?;

    Ok(hasher::mix_in_length(&root, withdrawals.len()))
}

fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "std")]
    {
        rayon::join(a, b)
    }

    #[cfg(not(feature = "std"))]
    {
        (a(), b())
    }
}

impl ExecutionPayloadHeader {
    /// Builds the header, truncating `extra_data` to [`MAX_EXTRA_DATA_BYTES`].
    pub fn from_executable_data(data: &ExecutableData) -> Result<Self, Error> {
        let extra_data = if data.extra_data.len() > MAX_EXTRA_DATA_BYTES {
            log::warn!(
                "Extra data of block #{} is {} bytes long, dropping the last {} bytes",
                data.number,
                data.extra_data.len(),
                data.extra_data.len() - MAX_EXTRA_DATA_BYTES
            );

            &data.extra_data[..MAX_EXTRA_DATA_BYTES]
        } else {
            &data.extra_data[..]
        };

        Self::build(data, extra_data)
    }

    /// Same as [`Self::from_executable_data`] but rejects oversized `extra_data`.
    pub fn try_from_executable_data_strict(data: &ExecutableData) -> Result<Self, Error> {
        if data.extra_data.len() > MAX_EXTRA_DATA_BYTES {
            return Err(Error::ExtraDataTooLong {
                len: data.extra_data.len(),
            });
        }

        Self::build(data, &data.extra_data)
    }

    fn build(data: &ExecutableData, extra_data: &[u8]) -> Result<Self, Error> {
        let withdrawals = data.withdrawals.as_deref().unwrap_or_default();
        let (transactions_root, withdrawals_root) = join(
            || transactions_root(&data.transactions),
            || withdrawals_root(withdrawals),
        );
        let (transactions_root, withdrawals_root) = (transactions_root?, withdrawals_root?);

        let extra_data = base_types::ByteList::try_from(extra_data).map_err(|_| {
            Error::ExtraDataTooLong {
                len: extra_data.len(),
            }
        })?;

        Ok(Self {
            parent_hash: Bytes32::from(data.parent_hash.0),
            fee_recipient: Address::from(data.fee_recipient.0),
            state_root: Bytes32::from(data.state_root.0),
            receipts_root: Bytes32::from(data.receipts_root.0),
            logs_bloom: LogsBloom::from(data.logs_bloom.0),
            prev_randao: Bytes32::from(data.prev_randao.0),
            block_number: data.number,
            gas_limit: data.gas_limit,
            gas_used: data.gas_used,
            timestamp: data.timestamp,
            extra_data,
            base_fee_per_gas: data.base_fee_per_gas,
            block_hash: Bytes32::from(data.block_hash.0),
            transactions_root,
            withdrawals_root,
            blob_gas_used: data.blob_gas_used.unwrap_or_default(),
            excess_blob_gas: data.excess_blob_gas.unwrap_or_default(),
        })
    }
}

impl TryFrom<&ExecutableData> for ExecutionPayloadHeader {
    type Error = Error;

    fn try_from(data: &ExecutableData) -> Result<Self, Self::Error> {
        Self::from_executable_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon::{Transaction, Transactions, Withdrawals};
    use hex_literal::hex;

    const EMPTY_TRANSACTIONS_ROOT: [u8; 32] =
        hex!("7ffe241ea60187fdb0187bfa22de35d1f9bed7ab061d9401fd47e34a54fbede1");
    const EMPTY_WITHDRAWALS_ROOT: [u8; 32] =
        hex!("792930bbd5baac43bcc798ee49aa8185ef76bb3b44ba62b91d86ae569e4bb535");

    // Engine API representation of a Deneb genesis block.
    const GENESIS: &str = r#"{
        "parentHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "feeRecipient": "0x0000000000000000000000000000000000000000",
        "stateRoot": "0x12965ddbc6f0e4f3f1f1c3bbc08b6d3e8eb53d22fdf3c01aba8f1453f5b26d9a",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logsBloom": "0x00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
        "prevRandao": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "number": "0x0",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": "0x0",
        "extraData": "0x",
        "baseFeePerGas": "0x3b9aca00",
        "blockHash": "0xd57819422128da1c44339fc7956662378c17e2213e669b427ac91cd11dfcfb38",
        "transactions": [],
        "withdrawals": [],
        "blobGasUsed": "0x0",
        "excessBlobGas": "0x0"
    }"#;

    fn sample() -> ExecutableData {
        ExecutableData {
            number: 12,
            gas_limit: 30_000_000,
            base_fee_per_gas: U256::from(1_000_000_000u64),
            transactions: vec![vec![0x02, 0xf8, 0x6f, 0x83], vec![], vec![0xab; 100]],
            withdrawals: Some(vec![
                ExecutableWithdrawal {
                    index: 1,
                    validator_index: 9,
                    address: H160::repeat_byte(0x01),
                    amount: 1_000,
                },
                ExecutableWithdrawal {
                    index: 2,
                    validator_index: 10,
                    address: H160::repeat_byte(0x02),
                    amount: 2_000,
                },
            ]),
            blob_gas_used: Some(131_072),
            ..Default::default()
        }
    }

    #[test]
    fn genesis_json() {
        let data: ExecutableData = serde_json::from_str(GENESIS).unwrap();
        assert_eq!(data.gas_limit, 30_000_000);
        assert_eq!(data.base_fee_per_gas, U256::from(1_000_000_000u64));

        let header = ExecutionPayloadHeader::from_executable_data(&data).unwrap();
        assert_eq!(header.block_number, 0);
        assert_eq!(header.block_hash.0, data.block_hash.0);
        assert_eq!(header.transactions_root, H256(EMPTY_TRANSACTIONS_ROOT));
        assert_eq!(header.withdrawals_root, H256(EMPTY_WITHDRAWALS_ROOT));
        assert_eq!(header.transactions_root, Transactions::default().tree_hash_root());
        assert_eq!(header.withdrawals_root, Withdrawals::default().tree_hash_root());
        assert_eq!(
            header.tree_hash_root(),
            H256(hex!("892e53228e2b3be013a92e1b4bc55b41340cf7991210bc4d1f12dabfe1e8938b"))
        );
    }

    #[test]
    fn empty_list_roots() {
        assert_eq!(transactions_root(&[]), Ok(H256(EMPTY_TRANSACTIONS_ROOT)));
        assert_eq!(withdrawals_root(&[]), Ok(H256(EMPTY_WITHDRAWALS_ROOT)));
    }

    #[test]
    fn roots_match_lists() {
        let data = sample();
        let header = ExecutionPayloadHeader::from_executable_data(&data).unwrap();

        let transactions = Transactions::try_from(
            data.transactions
                .iter()
                .map(|transaction| Transaction::try_from(&transaction[..]).unwrap())
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let withdrawals = Withdrawals::try_from(
            data.withdrawals
                .iter()
                .flatten()
                .map(Withdrawal::from)
                .collect::<Vec<_>>(),
        )
        .unwrap();

        assert_eq!(header.transactions_root, transactions.tree_hash_root());
        assert_eq!(header.withdrawals_root, withdrawals.tree_hash_root());
        assert_eq!(header.blob_gas_used, 131_072);
        assert_eq!(header.excess_blob_gas, 0);

        assert_eq!(
            header.transactions_root,
            H256(hex!("73c442411d3ec5e12caa5d604d8f97133e55564318961f5327ac3c3065f42135"))
        );
        assert_eq!(
            header.withdrawals_root,
            H256(hex!("a689be930c2ae6f9f785e18b152b58db1c00ac7a710633a5096a213436abbf17"))
        );
        assert_eq!(
            header.tree_hash_root(),
            H256(hex!("761587920a60203aa370380597251dd1bf9ae19330312cd0719acc9dc1cb3999"))
        );
    }

    #[test]
    fn absent_withdrawals_are_empty() {
        let data = ExecutableData {
            withdrawals: None,
            ..sample()
        };
        let header = ExecutionPayloadHeader::from_executable_data(&data).unwrap();

        assert_eq!(header.withdrawals_root, Withdrawals::default().tree_hash_root());
    }

    #[test]
    fn extra_data_is_truncated() {
        let data = ExecutableData {
            extra_data: (0..40).collect(),
            ..sample()
        };

        let header = ExecutionPayloadHeader::from_executable_data(&data).unwrap();
        assert_eq!(header.extra_data.0.len(), MAX_EXTRA_DATA_BYTES);
        assert_eq!(&header.extra_data.0[..], &data.extra_data[..MAX_EXTRA_DATA_BYTES]);

        assert_eq!(
            ExecutionPayloadHeader::try_from_executable_data_strict(&data),
            Err(Error::ExtraDataTooLong { len: 40 })
        );

        let exact = ExecutableData {
            extra_data: vec![7; MAX_EXTRA_DATA_BYTES],
            ..sample()
        };
        assert_eq!(
            ExecutionPayloadHeader::try_from_executable_data_strict(&exact),
            ExecutionPayloadHeader::from_executable_data(&exact)
        );
    }

    #[test]
    fn too_many_withdrawals() {
        let data = ExecutableData {
            withdrawals: Some(vec![Default::default(); MAX_WITHDRAWALS_PER_PAYLOAD + 1]),
            ..sample()
        };

        assert_eq!(
            ExecutionPayloadHeader::try_from(&data),
            Err(Error::TooManyWithdrawals { count: 17 })
        );
    }
}
