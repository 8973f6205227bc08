//! SlotArray: the fixed-length bucket storage underneath both tables.

use core::ops::{Index, IndexMut};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("index {index} out of bounds for slot array of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

/// Growable array with checked positional access.
///
/// Indexing with `[]` panics like a slice; `get_at_index`/`set_at_index`
/// report a boundary violation instead.
#[derive(Debug, Clone, Default)]
pub struct SlotArray<T> {
    items: Vec<T>,
}

impl<T> SlotArray<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Array of `len` slots, each produced by `fill`.
    pub fn filled<F>(len: usize, fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut items = Vec::with_capacity(len);
        items.resize_with(len, fill);
        Self { items }
    }

    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_at_index(&self, index: usize) -> Result<&T, SlotError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(SlotError::OutOfBounds { index, len })
    }

    pub fn get_mut_at_index(&mut self, index: usize) -> Result<&mut T, SlotError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(SlotError::OutOfBounds { index, len })
    }

    /// Replaces the slot at `index`, returning the previous occupant.
    pub fn set_at_index(&mut self, index: usize, value: T) -> Result<T, SlotError> {
        let slot = self.get_mut_at_index(index)?;
        Ok(core::mem::replace(slot, value))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> Index<usize> for SlotArray<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for SlotArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> IntoIterator for SlotArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
