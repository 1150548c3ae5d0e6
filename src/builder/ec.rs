use log::debug;

use crate::common::{
    ec::*,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
    BitStream,
};

// Padding
//------------------------------------------------------------------------------

static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// Fills the segmented bit stream up to the data capacity of the symbol: zero bits up to
/// the next byte boundary, then alternating pad codewords.
pub fn pad_to_capacity(bits: &BitStream, version: Version, ec_level: ECLevel) -> QRResult<Vec<u8>> {
    let capacity = version.data_bit_capacity(ec_level);
    if bits.len() > capacity {
        return Err(QRError::DataTooLong { bits: bits.len(), capacity });
    }

    // Trailing bits of the last byte are already zero
    let mut res = bits.data().to_vec();
    let data_len = version.data_codewords(ec_level);
    let pad_len = data_len - res.len();
    res.extend(PADDING_CODEWORDS.iter().cycle().take(pad_len));

    debug!("Padded {} bits with {pad_len} pad codewords", bits.len());
    Ok(res)
}

// Error correction & interleaving
//------------------------------------------------------------------------------

/// Splits the data codewords into blocks, appends Reed-Solomon codewords to each block and
/// interleaves them into the final codeword sequence: data bytes column by column across
/// blocks, then ecc bytes the same way.
///
/// `data` must hold exactly the data codewords of the version and error correction level.
pub fn add_ecc_and_interleave(version: Version, ec_level: ECLevel, data: &[u8]) -> Vec<u8> {
    assert_eq!(
        data.len(),
        version.data_codewords(ec_level),
        "Data len doesn't match data capacity: Version {version}, EC level {ec_level:?}"
    );

    let blocks = blockify(version, ec_level, data);

    let total_len = version.total_codewords();
    let mut res = Vec::with_capacity(total_len);
    for i in 0..blocks[0].len() {
        for blk in &blocks {
            if blk.placeholder_index() != Some(i) {
                res.push(blk.full()[i]);
            }
        }
    }

    assert_eq!(res.len(), total_len, "Interleaved len doesn't match total codewords");
    res
}

// Short blocks come first and hold one data codeword less than long blocks
fn blockify(version: Version, ec_level: ECLevel, data: &[u8]) -> Vec<Block> {
    let num_blocks = version.ec_blocks(ec_level);
    let ecc_len = version.ecc_per_block(ec_level);
    let total_len = version.total_codewords();
    let num_short = num_blocks - total_len % num_blocks;
    let short_len = total_len / num_blocks;

    // Degree comes from the capacity tables and is always within range
    let divisor = match compute_divisor(ecc_len) {
        Ok(d) => d,
        Err(e) => unreachable!("Capacity tables yield an invalid ecc length: {e}"),
    };

    let mut blocks = Vec::with_capacity(num_blocks);
    let mut start = 0;
    for i in 0..num_blocks {
        let short = i < num_short;
        let end = start + short_len - ecc_len + usize::from(!short);
        blocks.push(Block::new(&data[start..end], &divisor, short));
        start = end;
    }

    assert_eq!(start, data.len(), "Blocks didn't consume every data codeword");
    debug_assert!(
        blocks.iter().all(|b| b.ecc().len() == ecc_len
            && b.data().len() + usize::from(b.is_short()) + ecc_len == short_len + 1),
        "Blocks differ in length"
    );
    debug!(
        "Split {} data codewords into {num_short} short and {} long blocks, {ecc_len} ecc each",
        data.len(),
        num_blocks - num_short
    );
    blocks
}
