use super::*;

/// Writes the fields of a container: fixed fields and offsets inline, the
/// variable payloads after the fixed part.
pub struct ContainerEncoder<'a> {
    buf: &'a mut Vec<u8>,
    fixed_part_len: usize,
    variable: Vec<u8>,
}

impl<'a> ContainerEncoder<'a> {
    pub fn new(buf: &'a mut Vec<u8>, fixed_part_len: usize) -> Self {
        buf.reserve(fixed_part_len);

        Self {
            buf,
            fixed_part_len,
            variable: Vec::new(),
        }
    }

    pub fn append<T: Ssz>(&mut self, item: &T) {
        if T::is_fixed_size() {
            item.marshal_ssz_into(self.buf);
        } else {
            encode_offset(self.fixed_part_len + self.variable.len(), self.buf);
            item.marshal_ssz_into(&mut self.variable);
        }
    }

    pub fn finalize(self) {
        self.buf.extend_from_slice(&self.variable);
    }
}

enum Field {
    Fixed(Range<usize>),
    Variable { offset: usize },
}

/// Splits the encoding of a container into the byte ranges of its fields.
///
/// Fields are registered in declaration order, then [`ContainerDecoder::finish`]
/// validates the offset table and yields a [`ContainerFields`] cursor.
pub struct ContainerDecoder<'a> {
    bytes: &'a [u8],
    fixed_part_len: usize,
    position: usize,
    fields: Vec<Field>,
}

impl<'a> ContainerDecoder<'a> {
    pub fn new(bytes: &'a [u8], fixed_part_len: usize, fixed_size: bool) -> Result<Self, DecodeError> {
        let len = bytes.len();
        if len < fixed_part_len || (fixed_size && len != fixed_part_len) {
            return Err(DecodeError::UnexpectedEof {
                len,
                expected: fixed_part_len,
            });
        }

        Ok(Self {
            bytes,
            fixed_part_len,
            position: 0,
            fields: Vec::new(),
        })
    }

    pub fn register<T: Ssz>(&mut self) -> Result<(), DecodeError> {
        let start = self.position;
        let end = start + fixed_part_len(T::FIXED_SIZE);
        let slice = self
            .bytes
            .get(start..end)
            .ok_or(DecodeError::UnexpectedEof {
                len: self.bytes.len(),
                expected: end,
            })?;

        let field = match T::is_fixed_size() {
            true => Field::Fixed(start..end),
            false => Field::Variable {
                offset: read_offset(slice)?,
            },
        };

        self.fields.push(field);
        self.position = end;

        Ok(())
    }

    pub fn finish(self) -> Result<ContainerFields<'a>, DecodeError> {
        let len = self.bytes.len();
        let offsets = self
            .fields
            .iter()
            .filter_map(|field| match field {
                Field::Variable { offset } => Some(*offset),
                Field::Fixed(_) => None,
            })
            .collect::<Vec<_>>();

        if let Some(&first) = offsets.first() {
            if first != self.fixed_part_len {
                return Err(DecodeError::OffsetIntoFixedPortion {
                    offset: first,
                    expected: self.fixed_part_len,
                });
            }
        }

        for pair in offsets.windows(2) {
            if pair[1] < pair[0] {
                return Err(DecodeError::OffsetsNotMonotonic {
                    offset: pair[1],
                    previous: pair[0],
                });
            }
        }

        if let Some(&last) = offsets.last() {
            if last > len {
                return Err(DecodeError::OffsetOutOfBounds { offset: last, len });
            }
        }

        let mut ends = offsets.iter().skip(1).copied().chain(core::iter::once(len));
        let ranges = self
            .fields
            .into_iter()
            .map(|field| match field {
                Field::Fixed(range) => range,
                Field::Variable { offset } => offset..ends.next().unwrap_or(len),
            })
            .collect::<Vec<_>>();

        Ok(ContainerFields {
            bytes: self.bytes,
            ranges: ranges.into_iter(),
        })
    }
}

pub struct ContainerFields<'a> {
    bytes: &'a [u8],
    ranges: alloc::vec::IntoIter<Range<usize>>,
}

impl ContainerFields<'_> {
    pub fn decode_next<T: Ssz>(&mut self) -> Result<T, DecodeError> {
        let range = self.ranges.next().ok_or(DecodeError::UnexpectedEof {
            len: self.bytes.len(),
            expected: self.bytes.len() + BYTES_PER_LENGTH_OFFSET,
        })?;

        T::unmarshal_ssz(&self.bytes[range])
    }
}

/// Declares a struct and implements [`Ssz`] and [`TreeHash`] for it as an
/// SSZ container whose fields follow declaration order.
#[macro_export]
macro_rules! impl_ssz_container {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident: $type:ty
            ),*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                $field_vis $field: $type
            ),*
        }

        impl $name {
            const SSZ_FIXED_PART_LEN: usize =
                0 $(+ $crate::ssz::fixed_part_len(<$type as $crate::ssz::Ssz>::FIXED_SIZE))*;
        }

        impl $crate::ssz::Ssz for $name {
            const FIXED_SIZE: Option<usize> = {
                let size = Some(0usize);
                $(
                    let size = $crate::ssz::sum_fixed_sizes(
                        size,
                        <$type as $crate::ssz::Ssz>::FIXED_SIZE,
                    );
                )*
                size
            };

            fn size_ssz(&self) -> usize {
                0 $(+ $crate::ssz::field_size(&self.$field))*
            }

            fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
                let mut encoder = $crate::ssz::ContainerEncoder::new(buf, Self::SSZ_FIXED_PART_LEN);
                $(encoder.append(&self.$field);)*
                encoder.finalize();
            }

            fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, $crate::ssz::DecodeError> {
                let mut decoder = $crate::ssz::ContainerDecoder::new(
                    bytes,
                    Self::SSZ_FIXED_PART_LEN,
                    <Self as $crate::ssz::Ssz>::FIXED_SIZE.is_some(),
                )?;
                $(decoder.register::<$type>()?;)*
                let mut fields = decoder.finish()?;

                Ok(Self {
                    $($field: fields.decode_next::<$type>()?,)*
                })
            }
        }

        impl $crate::tree_hash::TreeHash for $name {
            fn tree_hash_type() -> $crate::tree_hash::TreeHashType {
                $crate::tree_hash::TreeHashType::Container
            }

            fn tree_hash_root(&self) -> $crate::Root {
                $crate::merkle::merkleize_roots(&[
                    $($crate::tree_hash::TreeHash::tree_hash_root(&self.$field)),*
                ])
            }
        }
    };
}
