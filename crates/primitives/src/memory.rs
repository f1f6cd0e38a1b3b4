//! Byte-addressable volatile memory, zero-extended on read and grown in
//! 32-byte-aligned steps.

use alloy::primitives::U256;

#[derive(Default, Debug, Clone)]
pub struct Memory {
    pub data: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Memory { data: Vec::new() }
    }

    pub fn new_with_data(data: Vec<u8>) -> Self {
        Memory { data }
    }

    /// Highest 32-byte-aligned offset touched so far, i.e. `MSIZE`.
    pub fn msize(&self) -> usize {
        self.data.len()
    }

    /// Grow the backing buffer, zero-filling the new region, so that
    /// `[offset, offset + len)` is addressable and `msize` becomes a
    /// multiple of 32 covering that range. A `len` of zero never grows
    /// memory, matching the real EVM's zero-length-access rule.
    pub fn resize_for(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = offset + len;
        let new_len = end.div_ceil(32) * 32;
        if new_len > self.data.len() {
            self.data.resize(new_len, 0);
        }
    }

    pub fn store_word(&mut self, offset: usize, word: U256) {
        self.resize_for(offset, 32);
        let bytes: [u8; 32] = word.to_be_bytes();
        self.data[offset..offset + 32].copy_from_slice(&bytes);
    }

    pub fn load_word(&mut self, offset: usize) -> U256 {
        self.resize_for(offset, 32);
        U256::from_be_slice(&self.data[offset..offset + 32])
    }

    pub fn store_byte(&mut self, offset: usize, byte: u8) {
        self.resize_for(offset, 1);
        self.data[offset] = byte;
    }

    pub fn load_byte(&mut self, offset: usize) -> u8 {
        self.resize_for(offset, 1);
        self.data[offset]
    }

    /// Read `len` bytes starting at `offset`, growing memory as needed.
    /// Used by opcodes (`SHA3`, `LOG*`, `RETURN`, …) that need an
    /// arbitrary-length slice rather than a single word.
    pub fn load_range(&mut self, offset: usize, len: usize) -> Vec<u8> {
        if len == 0 {
            return Vec::new();
        }
        self.resize_for(offset, len);
        self.data[offset..offset + len].to_vec()
    }

    /// Write `bytes` starting at `offset`, growing memory as needed.
    pub fn store_range(&mut self, offset: usize, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.resize_for(offset, bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Copy `length` bytes from `src` to `dest` within this buffer,
    /// growing memory to cover both ranges first. Overlapping ranges are
    /// handled correctly (`copy_within`), matching `MCOPY` semantics.
    pub fn copy_within(&mut self, dest: usize, src: usize, length: usize) {
        if length == 0 {
            return;
        }
        self.resize_for(dest, length);
        self.resize_for(src, length);
        self.data.copy_within(src..src + length, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mstore_mload_round_trip() {
        let mut memory = Memory::default();
        let value = U256::from(0x0au64);
        memory.store_word(4, value);
        assert_eq!(memory.load_word(4), value);
    }

    #[test]
    fn msize_rounds_up_to_word_boundary() {
        let mut memory = Memory::default();
        memory.store_byte(1, 0xff);
        assert_eq!(memory.msize(), 32);
        memory.store_word(32, U256::from(1));
        assert_eq!(memory.msize(), 64);
    }

    #[test]
    fn reads_past_end_are_zero_filled() {
        let mut memory = Memory::default();
        assert_eq!(memory.load_word(0), U256::ZERO);
        assert_eq!(memory.msize(), 32);
    }
}
