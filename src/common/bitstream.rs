use std::str::FromStr;

use super::error::{QRError, QRResult};

// Packed bit sequence, most significant bit first
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0 }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { data: bytes.to_vec(), len: bytes.len() << 3 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing bytes. Bits past `len` in the last byte are zero.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, i: usize) -> Option<bool> {
        if i >= self.len {
            return None;
        }
        Some(self.data[i >> 3] & (0b10000000 >> (i & 7)) != 0)
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    /// Appends the lowest `size` bits of `bits`, most significant first.
    pub fn push_bits(&mut self, bits: u32, size: usize) {
        debug_assert!(size <= 32, "Bit count shouldn't exceed 32: {size}");
        debug_assert!(
            size == 32 || bits >> size == 0,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & 1 == 1);
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(bytes);
            self.len += bytes.len() << 3;
        } else {
            bytes.iter().for_each(|&b| self.push_bits(b as u32, 8));
        }
    }

    pub fn iter(&self) -> BitIter<'_> {
        BitIter { stream: self, cursor: 0 }
    }

    pub fn to_bit_string(&self) -> String {
        self.iter().map(|b| if b { '1' } else { '0' }).collect()
    }
}

impl FromStr for BitStream {
    type Err = QRError;

    /// Parses a string of '0' and '1'. Whitespace and '_' separators are ignored.
    fn from_str(s: &str) -> QRResult<Self> {
        let mut bs = Self::with_capacity(s.len());
        for ch in s.chars().filter(|ch| !ch.is_whitespace() && *ch != '_') {
            match ch {
                '0' => bs.push(false),
                '1' => bs.push(true),
                _ => return Err(QRError::InvalidChar(ch)),
            }
        }
        Ok(bs)
    }
}

pub struct BitIter<'a> {
    stream: &'a BitStream,
    cursor: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.stream.get(self.cursor)?;
        self.cursor += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.stream.len - self.cursor;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BitIter<'_> {}

impl<'a> IntoIterator for &'a BitStream {
    type Item = bool;
    type IntoIter = BitIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
