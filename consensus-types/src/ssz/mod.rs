//! SimpleSerialize (SSZ) encoding.
//!
//! Fixed-size values are packed tightly. Variable-size values inside a
//! container or a collection are addressed by 4-byte little-endian offsets
//! stored in the fixed part, their payloads follow in declaration order.

use super::*;

mod container;

pub use container::{ContainerDecoder, ContainerEncoder, ContainerFields};

pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input: expected {expected} byte(s), got {len}")]
    UnexpectedEof { len: usize, expected: usize },
    #[error("offset {offset} is out of bounds for {len} byte(s)")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("offset {offset} is smaller than the preceding offset {previous}")]
    OffsetsNotMonotonic { offset: usize, previous: usize },
    #[error("first offset {offset} does not point at the end of the fixed part ({expected})")]
    OffsetIntoFixedPortion { offset: usize, expected: usize },
    #[error("{len} byte(s) do not split into elements of {element} byte(s)")]
    InvalidListLength { len: usize, element: usize },
    #[error("{len} element(s) exceed the maximum of {max}")]
    TooManyElements { len: usize, max: usize },
    #[error("expected exactly {expected} element(s), got {len}")]
    ElementCountMismatch { len: usize, expected: usize },
    #[error("invalid bytes: {0}")]
    BytesInvalid(String),
}

/// Binary codec of a type.
pub trait Ssz: Sized {
    /// Encoded length of fixed-size types, `None` for variable-size ones.
    const FIXED_SIZE: Option<usize>;

    fn is_fixed_size() -> bool {
        Self::FIXED_SIZE.is_some()
    }

    /// Exact length of the encoding of this value.
    fn size_ssz(&self) -> usize;

    /// Appends the encoding to `buf`.
    fn marshal_ssz_into(&self, buf: &mut Vec<u8>);

    fn marshal_ssz(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size_ssz());
        self.marshal_ssz_into(&mut buf);

        buf
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// Length occupied by a value of the given kind inside the fixed part of a container.
pub const fn fixed_part_len(fixed_size: Option<usize>) -> usize {
    match fixed_size {
        Some(size) => size,
        None => BYTES_PER_LENGTH_OFFSET,
    }
}

/// Fixed size of two consecutive fields, variable if any of them is.
pub const fn sum_fixed_sizes(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        _ => None,
    }
}

/// Bytes a field contributes to its container (offset included for variable fields).
pub fn field_size<T: Ssz>(value: &T) -> usize {
    match T::FIXED_SIZE {
        Some(size) => size,
        None => BYTES_PER_LENGTH_OFFSET + value.size_ssz(),
    }
}

/// Largest offset expressible in [`BYTES_PER_LENGTH_OFFSET`] bytes.
pub const MAX_LENGTH_VALUE: usize = u32::MAX as usize;

pub fn encode_offset(offset: usize, buf: &mut Vec<u8>) {
    debug_assert!(
        offset <= MAX_LENGTH_VALUE,
        "offset {offset} doesn't fit into {BYTES_PER_LENGTH_OFFSET} bytes"
    );

    buf.extend_from_slice(&(offset as u32).to_le_bytes());
}

pub fn read_offset(bytes: &[u8]) -> Result<usize, DecodeError> {
    let offset = bytes
        .get(..BYTES_PER_LENGTH_OFFSET)
        .ok_or(DecodeError::UnexpectedEof {
            len: bytes.len(),
            expected: BYTES_PER_LENGTH_OFFSET,
        })?;
    let mut buf = [0u8; BYTES_PER_LENGTH_OFFSET];
    buf.copy_from_slice(offset);

    Ok(u32::from_le_bytes(buf) as usize)
}

fn exact<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::UnexpectedEof {
        len: bytes.len(),
        expected: N,
    })
}

macro_rules! impl_ssz_uint {
    ($type:ty) => {
        impl Ssz for $type {
            const FIXED_SIZE: Option<usize> = Some(core::mem::size_of::<$type>());

            fn size_ssz(&self) -> usize {
                core::mem::size_of::<$type>()
            }

            fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }

            fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
                exact(bytes).map(<$type>::from_le_bytes)
            }
        }
    };
}

impl_ssz_uint!(u8);
impl_ssz_uint!(u64);

impl Ssz for bool {
    const FIXED_SIZE: Option<usize> = Some(1);

    fn size_ssz(&self) -> usize {
        1
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        buf.push(*self as u8);
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        match exact::<1>(bytes)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [byte] => Err(DecodeError::BytesInvalid(format!(
                "{byte:#04x} is not a boolean"
            ))),
        }
    }
}

impl Ssz for U256 {
    const FIXED_SIZE: Option<usize> = Some(32);

    fn size_ssz(&self) -> usize {
        32
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        let mut bytes = [0u8; 32];
        self.to_little_endian(&mut bytes);

        buf.extend_from_slice(&bytes);
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        exact::<32>(bytes).map(|bytes| U256::from_little_endian(&bytes))
    }
}

impl Ssz for H256 {
    const FIXED_SIZE: Option<usize> = Some(32);

    fn size_ssz(&self) -> usize {
        32
    }

    fn marshal_ssz_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }

    fn unmarshal_ssz(bytes: &[u8]) -> Result<Self, DecodeError> {
        exact::<32>(bytes).map(H256)
    }
}

/// Encoded length of a homogeneous sequence.
pub fn items_size<T: Ssz>(items: &[T]) -> usize {
    match T::FIXED_SIZE {
        Some(size) => size * items.len(),
        None => items.iter().map(field_size).sum(),
    }
}

/// Appends a homogeneous sequence: elements back to back when fixed-size,
/// an offset table followed by the payloads otherwise.
pub fn encode_items<T: Ssz>(items: &[T], buf: &mut Vec<u8>) {
    if T::is_fixed_size() {
        for item in items {
            item.marshal_ssz_into(buf);
        }

        return;
    }

    let mut encoder = ContainerEncoder::new(buf, items.len() * BYTES_PER_LENGTH_OFFSET);
    for item in items {
        encoder.append(item);
    }
    encoder.finalize();
}

/// Decodes a homogeneous sequence of at most `max` elements.
pub fn decode_items<T: Ssz>(bytes: &[u8], max: usize) -> Result<Vec<T>, DecodeError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(size) = T::FIXED_SIZE {
        if size == 0 || bytes.len() % size != 0 {
            return Err(DecodeError::InvalidListLength {
                len: bytes.len(),
                element: size,
            });
        }

        let count = bytes.len() / size;
        if count > max {
            return Err(DecodeError::TooManyElements { len: count, max });
        }

        return bytes.chunks_exact(size).map(T::unmarshal_ssz).collect();
    }

    let first = read_offset(bytes)?;
    if first == 0 || first % BYTES_PER_LENGTH_OFFSET != 0 {
        return Err(DecodeError::InvalidListLength {
            len: first,
            element: BYTES_PER_LENGTH_OFFSET,
        });
    }
    if first > bytes.len() {
        return Err(DecodeError::OffsetOutOfBounds {
            offset: first,
            len: bytes.len(),
        });
    }

    let count = first / BYTES_PER_LENGTH_OFFSET;
    if count > max {
        return Err(DecodeError::TooManyElements { len: count, max });
    }

    let mut items = Vec::with_capacity(count);
    let mut start = first;
    for i in 1..=count {
        let end = match i < count {
            true => {
                let offset = read_offset(&bytes[i * BYTES_PER_LENGTH_OFFSET..])?;
                if offset < start {
                    return Err(DecodeError::OffsetsNotMonotonic {
                        offset,
                        previous: start,
                    });
                }
                if offset > bytes.len() {
                    return Err(DecodeError::OffsetOutOfBounds {
                        offset,
                        len: bytes.len(),
                    });
                }

                offset
            }
            false => bytes.len(),
        };

        items.push(T::unmarshal_ssz(&bytes[start..end])?);
        start = end;
    }

    Ok(items)
}
