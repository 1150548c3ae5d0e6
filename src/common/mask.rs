use std::ops::Deref;

use log::trace;
use rayon::prelude::*;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern(pattern));
        }
        Ok(Self(pattern))
    }

    pub(crate) fn new_unchecked(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }

    pub fn all() -> impl ParallelIterator<Item = MaskPattern> {
        (0..8u8).into_par_iter().map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid masking pattern"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores every mask against the unmasked symbol in parallel and applies the one with the
/// lowest penalty. Ties go to the lowest mask index.
pub fn apply_best_mask(qr: &mut QR) -> QRResult<MaskPattern> {
    let (_, best_mask) = best_mask(qr)?;
    qr.apply_mask(best_mask)?;
    Ok(best_mask)
}

/// Lowest `(penalty, mask)` pair over all 8 masks. Fails if the symbol is already masked.
pub fn best_mask(qr: &QR) -> QRResult<(u32, MaskPattern)> {
    if let Some(m) = qr.mask() {
        return Err(QRError::AlreadyMasked(*m));
    }

    MaskPattern::all()
        .map(|m| -> QRResult<(u32, MaskPattern)> {
            let mut candidate = qr.clone();
            candidate.apply_mask(m)?;
            let pen = compute_total_penalty(&candidate);
            trace!("Mask {}: penalty {pen}", *m);
            Ok((pen, m))
        })
        .try_reduce(|| (u32::MAX, MaskPattern(0)), |a, b| Ok(a.min(b)))
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Runs of 5 or more same colored modules in a row or column: 3 points for the first 5,
// 1 point for every module after that.
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    let mut cols = vec![(Color::Light, 0); w as usize];
    for r in 0..w {
        let mut last = Color::Light;
        let mut consec_row_len = 0;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = *qr.get(r, c as i16);
            if c == 0 || last != clr {
                last = clr;
                consec_row_len = 0;
            }
            consec_row_len += 1;
            pen += run_penalty(consec_row_len);

            if r == 0 || col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            pen += run_penalty(col.1);
        }
    }
    pen
}

fn run_penalty(run_len: u32) -> u32 {
    match run_len {
        5 => 3,
        6.. => 1,
        _ => 0,
    }
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Dark-light-dark-dark-dark-light-dark with 4 light modules on either side. Modules
// outside the symbol count as light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    for i in 0..w {
        let get = |j: i16| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) };
        let is_light = |j: i16| j < 0 || j >= w || get(j) == Color::Light;
        for j in 0..w - 6 {
            if (j..j + 7).map(get).ne(PATTERN.iter().copied()) {
                continue;
            }
            if (j - 4..j).all(is_light) {
                pen += 40;
            }
            if (j + 7..j + 11).all(is_light) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every full 5% the dark proportion deviates from 50%, measured on the
// exact ratio so deviations above and below 50% score alike
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let tot = w * w;
    // |dark / tot - 1/2| / 5% == |20 * dark - 10 * tot| / tot
    let steps = (dark_cnt * 20).abs_diff(tot * 10) / tot;
    (steps * 10) as u32
}
