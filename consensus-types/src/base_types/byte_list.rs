use super::*;

/// Byte string of at most `N` bytes, hex encoded in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteList<const N: usize>(pub List<u8, N>);

impl<const N: usize> TryFrom<&[u8]> for ByteList<N> {
    type Error = String;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(data.try_into()?))
    }
}

impl<const N: usize> TryFrom<Vec<u8>> for ByteList<N> {
    type Error = String;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        Ok(Self(data.try_into()?))
    }
}

impl<const N: usize> AsRef<[u8]> for ByteList<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Ssz for ByteList<N> {
    const FIXED_SIZE: Option<usize> = None;

    fn size_ssz(&self) -> usize {
        self.0.len()
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        List::try_from(bytes)
            .map(Self)
            .map_err(|_| DecodeError::TooManyElements {
                len: bytes.len(),
                max: N,
            })
    }
}

impl<const N: usize> TreeHash for ByteList<N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_root(&self) -> Root {
        let root = tree_hash::bytes_tree_hash_root::<N>(&self.0);

        hasher::mix_in_length(&root, self.0.len())
    }
}

impl<'de, const N: usize> Deserialize<'de> for ByteList<N> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = utils::decode_hex_bytes(deserializer)?;

        Ok(Self(bytes.try_into().map_err(|_| {
            <D::Error as de::Error>::custom("Failed to convert to ByteList")
        })?))
    }
}

impl<const N: usize> Serialize for ByteList<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        utils::serialize_hex_bytes(&self.0, serializer)
    }
}
