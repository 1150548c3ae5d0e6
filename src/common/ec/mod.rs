mod block;
mod galois;

pub(crate) use block::*;
pub use galois::{multiply, G};

use super::error::{QRError, QRResult};

pub static MAX_DEGREE: usize = 255;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Generator polynomial `(x - r^0)(x - r^1)...(x - r^{degree-1})` with `r = 0x02`.
///
/// Coefficients are stored from highest to lowest power, leaving out the leading
/// term which is always 1. For example `x^3 + 255x^2 + 8x + 93` is `[255, 8, 93]`.
pub fn compute_divisor(degree: usize) -> QRResult<Vec<u8>> {
    if !(1..=MAX_DEGREE).contains(&degree) {
        return Err(QRError::InvalidDegree(degree));
    }

    // Start with the monomial x^0
    let mut res = vec![G::ZERO; degree];
    res[degree - 1] = G::ONE;

    let mut root = G::ONE;
    for _ in 0..degree {
        // Multiply the running product by (x - root), dropping the x^degree term
        for j in 0..degree {
            res[j] *= root;
            if j + 1 < degree {
                let next = res[j + 1];
                res[j] += next;
            }
        }
        root *= G::GENERATOR;
    }

    Ok(res.into_iter().map(u8::from).collect())
}

/// Remainder of `data * x^len(divisor)` divided by the generator polynomial. These are
/// the error correction codewords of one block.
pub fn compute_remainder(data: &[u8], divisor: &[u8]) -> Vec<u8> {
    let mut res = vec![0u8; divisor.len()];
    for &b in data {
        let factor = G(b ^ res.remove(0));
        res.push(0);
        for (r, &coeff) in res.iter_mut().zip(divisor.iter()) {
            *r ^= u8::from(G(coeff) * factor);
        }
    }
    res
}

// Rectifier for format and version infos
//------------------------------------------------------------------------------

/// Nearest valid codeword by Hamming distance, if it lies within `err_capacity` bits.
pub fn rectify_info(info: u32, valid_numbers: &[u32], err_capacity: u32) -> Option<u32> {
    let res = *valid_numbers.iter().min_by_key(|&n| (info ^ n).count_ones())?;

    if (info ^ res).count_ones() <= err_capacity {
        Some(res)
    } else {
        None
    }
}
