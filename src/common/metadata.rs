use std::fmt::{Display, Error, Formatter};
use std::ops::{Deref, Not};
use std::str::FromStr;

use super::ec::rectify_info;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(usize);

impl Version {
    pub const MIN: usize = 1;
    pub const MAX: usize = 40;

    pub fn new(version: usize) -> QRResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&version) {
            return Err(QRError::InvalidVersion(version));
        }
        Ok(Self(version))
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN..=Self::MAX).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Modules left for codewords and remainder bits once every function pattern and
    /// information area is excluded.
    pub fn raw_data_modules(self) -> usize {
        let v = self.0;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let num_align = v / 7 + 2;
            res -= (25 * num_align - 10) * num_align - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        assert!((208..=29648).contains(&res), "Raw data modules out of range: {res}");
        res
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn ec_blocks(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[ecl as usize][self.0] as usize
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_CODEWORDS_PER_BLOCK[ecl as usize][self.0] as usize
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ec_blocks(ecl) * self.ecc_per_block(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    /// Codeword errors the symbol can correct, after setting aside the codewords that
    /// small symbols reserve for misdecode protection.
    pub fn ec_capacity(self, ecl: ECLevel) -> usize {
        let p = match (self.0, ecl) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };
        let ec_bytes = self.ec_blocks(ecl) * self.ecc_per_block(ecl);
        (ec_bytes - p) / 2
    }

    /// Centre coordinates of alignment patterns along either axis, ascending.
    pub fn alignment_pattern(self) -> Vec<i16> {
        let v = self.0 as i16;
        if v == 1 {
            return Vec::new();
        }
        let num_align = v / 7 + 2;
        let step = if v == 32 { 26 } else { (v * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2 };
        let w = self.width() as i16;
        let mut res = vec![6];
        res.extend((0..num_align - 1).rev().map(|i| w - 7 - i * step));
        res
    }

    /// 18-bit version information: 6 version bits followed by 12 Golay check bits.
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only defined from version 7");
        let data = self.0 as u32;
        let mut rem = data;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_GEN_POLY);
        }
        data << 12 | rem
    }

    pub fn from_info(info: u32) -> QRResult<Self> {
        let valid = (7..=Self::MAX).map(|v| Version(v).info()).collect::<Vec<_>>();
        let info = rectify_info(info, &valid, VERSION_ERROR_CAPACITY)
            .ok_or(QRError::InvalidVersionInfo)?;
        Ok(Self((info >> 12) as usize))
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<usize> for Version {
    type Error = QRError;
    fn try_from(version: usize) -> QRResult<Self> {
        Self::new(version)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit indicator written into format info: L = 01, M = 00, Q = 11, H = 10.
    pub fn format_bits(self) -> u32 {
        (self as u32) ^ 1
    }

    fn from_format_bits(bits: u32) -> Self {
        Self::ALL[(bits ^ 1) as usize & 3]
    }
}

impl TryFrom<char> for ECLevel {
    type Error = QRError;
    fn try_from(c: char) -> QRResult<Self> {
        match c.to_ascii_uppercase() {
            'L' => Ok(Self::L),
            'M' => Ok(Self::M),
            'Q' => Ok(Self::Q),
            'H' => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel(c)),
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            (Some(c), Some(_)) => Err(QRError::InvalidECLevel(c)),
            (None, _) => Err(QRError::InvalidECLevel(' ')),
        }
    }
}

// Format info
//------------------------------------------------------------------------------

/// 15-bit format information: EC indicator and mask index, 10 BCH check bits, XORed with
/// the format mask.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = ecl.format_bits() << 3 | *mask as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GEN_POLY);
    }
    (data << 10 | rem) ^ FORMAT_MASK
}

pub fn parse_format_info(info: u32) -> QRResult<(ECLevel, MaskPattern)> {
    let valid = ECLevel::ALL
        .iter()
        .flat_map(|&ecl| (0..8).map(move |m| format_info(ecl, MaskPattern::new_unchecked(m))))
        .collect::<Vec<_>>();
    let info = rectify_info(info, &valid, FORMAT_ERROR_CAPACITY).ok_or(QRError::InvalidFormatInfo)?;
    let data = (info ^ FORMAT_MASK) >> 10;
    Ok((ECLevel::from_format_bits(data >> 3), MaskPattern::new_unchecked((data & 7) as u8)))
}


// Global constants
//------------------------------------------------------------------------------

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static FORMAT_GEN_POLY: u32 = 0x537;

pub static FORMAT_MASK: u32 = 0b101010000010010;

pub static FORMAT_ERROR_CAPACITY: u32 = 3;

pub static VERSION_INFO_BIT_LEN: usize = 18;

pub static VERSION_GEN_POLY: u32 = 0x1F25;

pub static VERSION_ERROR_CAPACITY: u32 = 3;

// Format info coordinates listed from the most significant bit. Negative indices wrap
// from the bottom or right edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

// Version info coordinates listed from the most significant bit
pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

// Indexed by [ECLevel][version]; index 0 is unused
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
