use super::*;

/// A homogenous collection of a variable number of values, at most `N`.
#[derive(Clone)]
pub struct List<T, const N: usize> {
    data: Vec<T>,
}

struct ListVisitor<T>(PhantomData<Vec<T>>);

impl<'de, T: Deserialize<'de>> de::Visitor<'de> for ListVisitor<T> {
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

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for List<T, N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = deserializer.deserialize_seq(ListVisitor(PhantomData))?;
        List::<T, N>::try_from(data).map_err(de::Error::custom)
    }
}

impl<T: Serialize, const N: usize> Serialize for List<T, N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<T, const N: usize> AsRef<[T]> for List<T, N> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T: Debug, const N: usize> fmt::Debug for List<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if f.alternate() {
            write!(
                f,
                "List<{}, {}>(len={}){:#?}",
                any::type_name::<T>(),
                N,
                self.len(),
                self.data
            )
        } else {
            write!(
                f,
                "List<{}, {}>(len={}){:?}",
                any::type_name::<T>(),
                N,
                self.len(),
                self.data
            )
        }
    }
}

impl<T, const N: usize> Default for List<T, N> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T: PartialEq, const N: usize> PartialEq for List<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T, const N: usize> Eq for List<T, N> where T: Eq {}

impl<T, const N: usize> TryFrom<Vec<T>> for List<T, N> {
    type Error = String;

    fn try_from(data: Vec<T>) -> Result<Self, Self::Error> {
        if data.len() > N {
            let len = data.len();
            Err(format!(
                "Unable to construct List<T, {N}> from vec![T; {len}]"
            ))
        } else {
            Ok(Self { data })
        }
    }
}

impl<T: Clone, const N: usize> TryFrom<&[T]> for List<T, N> {
    type Error = String;

    fn try_from(data: &[T]) -> Result<Self, Self::Error> {
        if data.len() > N {
            let len = data.len();
            Err(format!(
                "Unable to construct List<T, {N}> from &[T] (length = {len})"
            ))
        } else {
            Ok(Self {
                data: data.to_vec(),
            })
        }
    }
}

impl<T, const N: usize> From<List<T, N>> for Vec<T> {
    fn from(list: List<T, N>) -> Self {
        list.data
    }
}

impl<T, const N: usize> Deref for List<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

// NOTE: `IndexMut` rather than `DerefMut` so the length stays under control.
impl<T, Idx: SliceIndex<[T]>, const N: usize> Index<Idx> for List<T, N> {
    type Output = <Idx as SliceIndex<[T]>>::Output;

    fn index(&self, index: Idx) -> &Self::Output {
        &self.data[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for List<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T, const N: usize> List<T, N> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Appends `element` unless the list is full.
    pub fn push(&mut self, element: T) -> Option<()> {
        if self.data.len() < N {
            self.data.push(element);

            return Some(());
        }

        None
    }

    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }
}

impl<T: Ssz, const N: usize> Ssz for List<T, N> {
    const FIXED_SIZE: Option<usize> = None;

    fn size_ssz(&self) -> usize {
        ssz::items_size(&self.data)
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        ssz::encode_items(&self.data, buf)
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        ssz::decode_items(bytes, N).map(|data| Self { data })
    }
}

impl<T: TreeHash, const N: usize> TreeHash for List<T, N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_root(&self) -> Root {
        let root = tree_hash::vec_tree_hash_root::<T, N>(&self.data);

        hasher::mix_in_length(&root, self.len())
    }
}
