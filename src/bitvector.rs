//! Fixed size packed array of bit.

/* crate use */
use bitvec::prelude::*;

/* project use */
use crate::error;

/// Number of bit store in one word
pub const WORD_BITS: usize = u32::BITS as usize;

/// Fixed size array of bit, backing storage is never resize after construction.
#[derive(Debug, Clone)]
pub struct BitVector {
    bits: BitVec<u32, Lsb0>,
}

impl BitVector {
    /// Build a BitVector of `size` bit all set to false
    pub fn new(size: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, size),
        }
    }

    /// Number of addressable bit
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Return true if BitVector can't store any bit
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Acces to backing storage, `ceil(len / WORD_BITS)` words
    pub fn words(&self) -> &[u32] {
        self.bits.as_raw_slice()
    }

    /// Get value of bit at position `idx`
    pub fn get(&self, idx: usize) -> error::Result<bool> {
        self.bits
            .get(idx)
            .map(|bit| *bit)
            .ok_or(error::Error::IndexOutOfRange {
                index: idx,
                size: self.bits.len(),
            })
    }

    /// Set value of bit at position `idx`
    pub fn set(&mut self, idx: usize, bit: bool) -> error::Result<()> {
        let size = self.bits.len();
        let result = match self.bits.get_mut(idx) {
            Some(mut slot) => {
                *slot = bit;
                Ok(())
            }
            None => Err(error::Error::IndexOutOfRange { index: idx, size }),
        };
        result
    }

    /// Get value of bit at position `idx`
    ///
    /// # Panics
    /// If `idx` is larger than [BitVector::len]
    pub fn bit(&self, idx: usize) -> bool {
        self.bits[idx]
    }

    /// Set bit at position `idx` to true
    ///
    /// # Panics
    /// If `idx` is larger than [BitVector::len]
    pub fn mark(&mut self, idx: usize) {
        self.bits.set(idx, true);
    }

    /// Number of bit set to true
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Set in self every bit set in other
    pub fn union_with(&mut self, other: &BitVector) -> error::Result<()> {
        if self.bits.len() != other.bits.len() {
            return Err(error::Error::IncompatibleTables);
        }

        for (word, other_word) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *word |= *other_word;
        }

        Ok(())
    }
}
