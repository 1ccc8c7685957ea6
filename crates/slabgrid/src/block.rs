//! The single owned allocation backing a grid.
//!
//! A [`Block`] is one zero-initialised `Box<[u8]>`. Grids carve it into a
//! header of word-sized offset tables followed by the element payload; the
//! block itself only knows about bytes and words.

use crate::error::GridError;
use crate::shape::WORD_SIZE;

/// One contiguous, zero-initialised heap allocation.
///
/// The block is the unit of ownership: dropping it releases header and
/// payload together with a single deallocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Block {
    data: Box<[u8]>,
}

impl Block {
    /// Allocate `len` zeroed bytes as one block.
    ///
    /// Uses fallible reservation so an unsatisfiable request comes back as
    /// [`GridError::AllocationFailed`] instead of aborting the process.
    /// A zero-length block performs no allocation at all.
    pub fn zeroed(len: usize) -> Result<Self, GridError> {
        let mut data = Vec::<u8>::new();
        if let Err(err) = data.try_reserve_exact(len) {
            log::debug!("block allocation of {len} bytes failed: {err}");
            return Err(GridError::AllocationFailed { bytes: len });
        }
        data.resize(len, 0u8);
        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }

    /// Read the header word stored at byte `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + WORD_SIZE` exceeds the block length.
    pub fn read_word(&self, offset: usize) -> usize {
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.data[offset..offset + WORD_SIZE]);
        usize::from_ne_bytes(word)
    }

    /// Store `value` as a header word at byte `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + WORD_SIZE` exceeds the block length.
    pub fn write_word(&mut self, offset: usize, value: usize) {
        self.data[offset..offset + WORD_SIZE].copy_from_slice(&value.to_ne_bytes());
    }

    /// Shared view of `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the block length.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Mutable view of `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the block length.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// The whole block, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Block length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block holds no bytes (and owns no allocation).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_block_is_all_zero() {
        let block = Block::zeroed(64).unwrap();
        assert_eq!(block.len(), 64);
        assert!(block.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_length_block_is_empty() {
        let block = Block::zeroed(0).unwrap();
        assert!(block.is_empty());
        assert_eq!(block.as_bytes(), &[] as &[u8]);
    }

    #[test]
    fn word_round_trip() {
        let mut block = Block::zeroed(3 * WORD_SIZE).unwrap();
        block.write_word(WORD_SIZE, 0xDEAD);
        assert_eq!(block.read_word(0), 0);
        assert_eq!(block.read_word(WORD_SIZE), 0xDEAD);
        assert_eq!(block.read_word(2 * WORD_SIZE), 0);
    }

    #[test]
    fn words_use_native_byte_order() {
        let mut block = Block::zeroed(WORD_SIZE).unwrap();
        block.write_word(0, 1);
        assert_eq!(block.as_bytes(), &1usize.to_ne_bytes());
    }

    #[test]
    fn bytes_mut_writes_are_visible() {
        let mut block = Block::zeroed(16).unwrap();
        block.bytes_mut(4, 2).copy_from_slice(&[7, 9]);
        assert_eq!(block.bytes(3, 4), &[0u8, 7, 9, 0]);
    }

    #[test]
    #[should_panic]
    fn word_past_end_panics() {
        let block = Block::zeroed(WORD_SIZE).unwrap();
        block.read_word(1);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn unsatisfiable_request_reports_allocation_failure() {
        // Representable as a size, but no allocator can hand out 2^62 bytes.
        let bytes = 1usize << (usize::BITS - 2);
        assert_eq!(
            Block::zeroed(bytes),
            Err(GridError::AllocationFailed { bytes })
        );
    }
}
