//! Serde helpers for the JSON representations used by beacon and engine APIs.

use super::*;
use core::str::FromStr;

fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

/// Hex string with an optional `0x` prefix.
pub fn decode_hex_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bytes: String = Deserialize::deserialize(deserializer)?;

    hex::decode(strip_hex_prefix(&bytes)).map_err(<D::Error as de::Error>::custom)
}

pub fn serialize_hex_bytes<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

pub fn deserialize_hex_bytes_list<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let items: Vec<String> = Deserialize::deserialize(deserializer)?;

    items
        .iter()
        .map(|item| hex::decode(strip_hex_prefix(item)).map_err(<D::Error as de::Error>::custom))
        .collect()
}

pub fn serialize_hex_bytes_list<S>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(items.iter().map(|item| format!("0x{}", hex::encode(item))))
}

/// Decimal number in a JSON string, as the beacon API encodes `uint64`.
pub fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: String = Deserialize::deserialize(deserializer)?;

    u64::from_str(&value).map_err(<D::Error as de::Error>::custom)
}

pub fn serialize_u64<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize_u256<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let val: String = Deserialize::deserialize(deserializer)?;

    U256::from_dec_str(&val).map_err(<D::Error as de::Error>::custom)
}

pub fn serialize_u256<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

/// Engine API quantity: `0x`-prefixed hexadecimal without leading zeros.
pub mod quantity {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: String = Deserialize::deserialize(deserializer)?;
        let digits = value
            .strip_prefix("0x")
            .ok_or_else(|| <D::Error as de::Error>::custom("quantity must start with 0x"))?;

        u64::from_str_radix(digits, 16).map_err(<D::Error as de::Error>::custom)
    }

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{value:#x}"))
    }
}

pub mod quantity_opt {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "quantity")] u64);

        let value: Option<Wrapper> = Deserialize::deserialize(deserializer)?;

        Ok(value.map(|Wrapper(value)| value))
    }

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match value {
            Some(value) => quantity::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Sample {
        #[serde(
            deserialize_with = "deserialize_u64",
            serialize_with = "serialize_u64"
        )]
        slot: u64,
        #[serde(with = "quantity")]
        number: u64,
        #[serde(default, with = "quantity_opt")]
        blob_gas: Option<u64>,
        #[serde(
            deserialize_with = "decode_hex_bytes",
            serialize_with = "serialize_hex_bytes"
        )]
        data: Vec<u8>,
    }

    #[test]
    fn json_encodings() {
        let json = r#"{"slot":"5151035","number":"0x1b4","blob_gas":null,"data":"0x0102"}"#;
        let sample: Sample = serde_json::from_str(json).unwrap();

        assert_eq!(
            sample,
            Sample {
                slot: 5_151_035,
                number: 436,
                blob_gas: None,
                data: vec![1, 2],
            }
        );
        assert_eq!(serde_json::to_string(&sample).unwrap(), json);

        let sample: Sample =
            serde_json::from_str(r#"{"slot":"1","number":"0x0","blob_gas":"0x20000","data":""}"#)
                .unwrap();
        assert_eq!(sample.number, 0);
        assert_eq!(sample.blob_gas, Some(0x20000));
        assert!(sample.data.is_empty());
    }

    #[test]
    fn malformed_values() {
        assert!(serde_json::from_str::<Sample>(
            r#"{"slot":"0x1","number":"0x1","data":"0x"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"slot":"1","number":"1","data":"0x"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(
            r#"{"slot":"1","number":"0x1","data":"0x123"}"#
        )
        .is_err());
    }

    #[test]
    fn quoted_u256() {
        let value = serde_json::from_str::<serde_json::Value>("\"1000000000\"").unwrap();

        assert_eq!(
            deserialize_u256(value).unwrap(),
            U256::from(1_000_000_000u64)
        );
    }
}
