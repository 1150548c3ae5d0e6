use super::compute_remainder;

// Codeword block: data codewords followed by their error correction codewords
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Block {
    data: Vec<u8>,
    // Data length
    dlen: usize,
    // Short blocks carry a placeholder byte after the data so every block in a
    // symbol has the same length. It is never emitted.
    short: bool,
}

impl Block {
    pub fn new(raw: &[u8], divisor: &[u8], short: bool) -> Self {
        let dlen = raw.len();
        let ecc = compute_remainder(raw, divisor);
        let mut data = Vec::with_capacity(dlen + usize::from(short) + ecc.len());
        data.extend_from_slice(raw);
        if short {
            data.push(0);
        }
        data.extend(ecc);
        Self { data, dlen, short }
    }

    /// Length including the placeholder byte of a short block.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_short(&self) -> bool {
        self.short
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.short.then_some(self.dlen)
    }

    pub fn full(&self) -> &[u8] {
        &self.data
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        let start = self.dlen + usize::from(self.short);
        &self.data[start..]
    }
}

#[cfg(test)]
mod block_tests {
    use super::Block;
    use crate::common::ec::compute_divisor;

    #[test]
    fn test_block_layout() {
        let divisor = compute_divisor(10).unwrap();
        let raw = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let blk = Block::new(raw, &divisor, false);
        assert_eq!(blk.len(), 26);
        assert_eq!(blk.data(), raw);
        assert_eq!(blk.ecc(), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
        assert_eq!(blk.placeholder_index(), None);
    }

    #[test]
    fn test_short_block_placeholder() {
        let divisor = compute_divisor(4).unwrap();
        let blk = Block::new(&[1, 2, 3], &divisor, true);
        assert!(blk.is_short());
        assert_eq!(blk.len(), 8);
        assert_eq!(blk.placeholder_index(), Some(3));
        assert_eq!(blk.full()[3], 0);
        assert_eq!(blk.data(), &[1, 2, 3]);
        assert_eq!(blk.ecc().len(), 4);
    }
}
