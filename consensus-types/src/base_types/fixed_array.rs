use super::*;

/// A homogenous collection of a fixed number of values.
///
/// NOTE: collection of length `0` is illegal.
#[derive(Clone)]
pub struct FixedArray<T, const N: usize>(pub [T; N]);

impl<T: PartialEq, const N: usize> PartialEq for FixedArray<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq, const N: usize> Eq for FixedArray<T, N> {}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self(core::array::from_fn(|_| T::default()))
    }
}

impl<T: Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if f.alternate() {
            write!(f, "FixedArray<{}, {N}>{:#?}", any::type_name::<T>(), self.0)
        } else {
            write!(f, "FixedArray<{}, {N}>{:?}", any::type_name::<T>(), self.0)
        }
    }
}

impl<T, const N: usize> Deref for FixedArray<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

struct VectorVisitor<T>(PhantomData<Vec<T>>);

impl<'de, T: Deserialize<'de>> de::Visitor<'de> for VectorVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("array of objects")
    }

    fn visit_seq<S>(self, visitor: S) -> Result<Self::Value, S::Error>
    where
        S: de::SeqAccess<'de>,
    {
        Deserialize::deserialize(de::value::SeqAccessDeserializer::new(visitor))
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for FixedArray<T, N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = deserializer.deserialize_seq(VectorVisitor(PhantomData))?;

        Ok(Self(data.try_into().map_err(|_| {
            de::Error::custom("unable to create [T; N] from Vec<T>")
        })?))
    }
}

impl<T: Serialize, const N: usize> Serialize for FixedArray<T, N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<T: Ssz, const N: usize> Ssz for FixedArray<T, N> {
    const FIXED_SIZE: Option<usize> = match T::FIXED_SIZE {
        Some(size) => Some(size * N),
        None => None,
    };

    fn size_ssz(&self) -> usize {
        ssz::items_size(&self.0)
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        ssz::encode_items(&self.0, buf)
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        if let Some(size) = Self::FIXED_SIZE {
            if bytes.len() != size {
                return Err(DecodeError::UnexpectedEof {
                    len: bytes.len(),
                    expected: size,
                });
            }
        }

        let items = ssz::decode_items::<T>(bytes, N)?;
        let len = items.len();

        items
            .try_into()
            .map(Self)
            .map_err(|_| DecodeError::ElementCountMismatch { len, expected: N })
    }
}

impl<T: TreeHash, const N: usize> TreeHash for FixedArray<T, N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_root(&self) -> Root {
        tree_hash::vec_tree_hash_root::<T, N>(&self.0)
    }
}
