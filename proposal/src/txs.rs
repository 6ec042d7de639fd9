//! Positional access to the transaction list of a proposal.
//!
//! All operations keep the relative order of the other entries and fail
//! instead of panicking on an out of range position.

use super::*;

pub fn get_at<T>(items: &[T], position: usize) -> Result<&T, Error> {
    items.get(position).ok_or(Error::PositionOutOfRange {
        position,
        len: items.len(),
    })
}

/// Inserts `item` at `position`, which may be the end of the list.
pub fn insert_at<T>(items: &mut Vec<T>, position: usize, item: T) -> Result<(), Error> {
    if position > items.len() {
        return Err(Error::PositionOutOfRange {
            position,
            len: items.len(),
        });
    }

    items.insert(position, item);

    Ok(())
}

pub fn remove_at<T>(items: &mut Vec<T>, position: usize) -> Result<T, Error> {
    if position >= items.len() {
        return Err(Error::PositionOutOfRange {
            position,
            len: items.len(),
        });
    }

    Ok(items.remove(position))
}
