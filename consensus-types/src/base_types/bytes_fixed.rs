use super::*;

/// Byte vector of length `N`, hex encoded in JSON.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BytesFixed<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for BytesFixed<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> fmt::Debug for BytesFixed<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl<const N: usize> AsRef<[u8]> for BytesFixed<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for BytesFixed<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> TryFrom<&[u8]> for BytesFixed<N> {
    type Error = String;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        data.try_into()
            .map(Self)
            .map_err(|_| format!("Expected {N} byte(s), got {}", data.len()))
    }
}

impl<const N: usize> Ssz for BytesFixed<N> {
    const FIXED_SIZE: Option<usize> = Some(N);

    fn size_ssz(&self) -> usize {
        N
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| DecodeError::UnexpectedEof {
                len: bytes.len(),
                expected: N,
            })
    }
}

impl<const N: usize> TreeHash for BytesFixed<N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_root(&self) -> Root {
        tree_hash::bytes_tree_hash_root::<N>(&self.0)
    }
}

impl<'de, const N: usize> Deserialize<'de> for BytesFixed<N> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = utils::decode_hex_bytes(deserializer)?;

        Ok(Self(bytes.try_into().map_err(|_| {
            <D::Error as de::Error>::custom("Failed to convert to BytesFixed")
        })?))
    }
}

impl<const N: usize> Serialize for BytesFixed<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        utils::serialize_hex_bytes(&self.0, serializer)
    }
}
