use std::io::{self, Read, Write};

use crate::tree::{self, Level1};

/// Level-1 length cap accepted from the wire. A 31-bit bit index decomposes
/// into at most 2^15 level-1 slots.
const MAX_LEVEL1_LEN: usize = 1 << 15;

/// A sparse bitset over signed-31-bit indices.
///
/// Bits live in a 3-level tree of 64-bit words; unpopulated regions consume
/// no memory and read as false.
#[derive(Debug, Default)]
pub struct SparseBitSet {
    level1: Level1,
}

impl SparseBitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the bit at `index`. Unset bits and untouched regions are false.
    #[inline]
    pub fn get(&self, index: u32) -> bool {
        debug_assert!(index < 1 << 31, "index {index} exceeds the signed domain");
        let (w1, w2, w3) = tree::split_word_index(index >> 6);
        tree::word(&self.level1, w1, w2, w3) >> (index & 63) & 1 != 0
    }

    /// Sets the bit at `index`, creating intermediate levels as needed.
    pub fn set(&mut self, index: u32) {
        debug_assert!(index < 1 << 31, "index {index} exceeds the signed domain");
        let (w1, w2, w3) = tree::split_word_index(index >> 6);
        *tree::word_mut(&mut self.level1, w1, w2, w3) |= 1 << (index & 63);
    }

    /// Clears the bit at `index`. A miss on an unpopulated region is a no-op.
    pub fn clear(&mut self, index: u32) {
        let (w1, w2, w3) = tree::split_word_index(index >> 6);
        if tree::word(&self.level1, w1, w2, w3) != 0 {
            *tree::word_mut(&mut self.level1, w1, w2, w3) &= !(1 << (index & 63));
        }
    }

    /// Rough resident size in bytes.
    pub fn memory_estimate(&self) -> usize {
        tree::memory_estimate(&self.level1)
    }

    /// Writes the compact tree encoding.
    pub fn write_into(&self, w: &mut impl Write) -> io::Result<()> {
        tree::write_tree(w, &self.level1)
    }

    /// Reads the compact tree encoding.
    pub fn read_from(r: &mut impl Read) -> io::Result<Self> {
        let level1 = tree::read_tree(r, MAX_LEVEL1_LEN)?;
        Ok(Self { level1 })
    }
}
