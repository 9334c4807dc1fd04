//! A fixed 4KB page holding `ROWS_PER_PAGE` encoded rows back to back.

use crate::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE};

/// Raw page bytes. Rows are copied in and out; callers never get a mutable
/// view of the buffer, so slot boundaries stay fixed.
pub struct Page {
    data: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    /// Create a new zeroed page.
    pub fn new() -> Self {
        Self {
            data: Box::new([0u8; PAGE_SIZE]),
        }
    }

    #[cfg(test)]
    fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    /// Copy the row stored at `slot` out of the page.
    ///
    /// # Panics
    /// If `slot >= ROWS_PER_PAGE`.
    pub fn read_row(&self, slot: usize) -> [u8; ROW_SIZE] {
        let offset = Self::slot_offset(slot);
        let mut buf = [0u8; ROW_SIZE];
        buf.copy_from_slice(&self.data[offset..offset + ROW_SIZE]);
        buf
    }

    /// Copy an encoded row into `slot`.
    ///
    /// # Panics
    /// If `slot >= ROWS_PER_PAGE`.
    pub fn write_row(&mut self, slot: usize, row: &[u8; ROW_SIZE]) {
        let offset = Self::slot_offset(slot);
        self.data[offset..offset + ROW_SIZE].copy_from_slice(row);
    }

    #[inline]
    fn slot_offset(slot: usize) -> usize {
        assert!(slot < ROWS_PER_PAGE, "slot {slot} out of range");
        slot * ROW_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
