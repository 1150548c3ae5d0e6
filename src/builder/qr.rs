use std::ops::Deref;

use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::*;
use crate::common::{BitStream, QRError, QRResult};

/// Information area a reserved module is held for until masking is done.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Region {
    Format,
    Version,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Reserved(Region),
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty | Module::Reserved(_) => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// No module is left empty or held for information that hasn't been written.
    pub fn is_complete(&self) -> bool {
        !self.grid.iter().any(|m| matches!(m, Module::Empty | Module::Reserved(_)))
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Reserved(Region::Format) => 'x',
                    Module::Reserved(Region::Version) => 'y',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be less than w");
        debug_assert!(-w <= c && c < w, "column should be less than w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // 7x7 finder centred on (r, c) together with the light separator on its inner sides
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        let (off, last) = (6, w - 9);
        self.draw_line(off, 8, off, last);
        self.draw_line(8, off, last, off);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in &poses {
            for &c in &poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        // Positions that would land on a finder pattern
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    /// Stamps finders with separators, timing, alignment patterns, the dark module, and
    /// holds the format and version areas. Whatever stays empty is the encoding region.
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.reserve_format_area();
        self.reserve_version_area();
    }
}

#[cfg(test)]
mod function_pattern_tests {
    use super::QR;
    use crate::common::metadata::{ECLevel, Version};

    fn qr(v: usize) -> QR {
        QR::new(Version::new(v).unwrap(), ECLevel::L)
    }

    #[test]
    fn test_finder_pattern_qr() {
        let mut qr = qr(1);
        qr.draw_finder_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = qr(1);
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }

    #[test]
    fn test_finder_and_timing_join() {
        let mut qr = qr(1);
        qr.draw_finder_patterns();
        qr.draw_timing_pattern();
        assert_eq!(qr.to_debug_str(), FINDER_AND_TIMING_1);
    }

    #[test]
    fn test_alignment_pattern_1() {
        let mut qr = qr(1);
        qr.draw_alignment_patterns();
        assert!(qr.grid().iter().all(|m| *m == super::Module::Empty));
    }

    #[test]
    fn test_alignment_pattern_3() {
        let mut qr = qr(3);
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............Ffffffff\n\
             fFFFFFfF.............FfFFFFFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFFFFFfF.............FfFFFFFf\n\
             fffffffF.............Ffffffff\n\
             FFFFFFFF.............FFFFFFFF\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             ....................fffff....\n\
             FFFFFFFF............fFFFf....\n\
             fffffffF............fFfFf....\n\
             fFFFFFfF............fFFFf....\n\
             fFfffFfF............fffff....\n\
             fFfffFfF.....................\n\
             fFfffFfF.....................\n\
             fFFFFFfF.....................\n\
             fffffffF.....................\n"
        );
    }

    #[test]
    fn test_alignment_pattern_7() {
        let mut qr = qr(7);
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............................Ffffffff\n\
             fFFFFFfF.............................FfFFFFFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF............fffff............FfFfffFf\n\
             fFFFFFfF............fFFFf............FfFFFFFf\n\
             fffffffF............fFfFf............Ffffffff\n\
             FFFFFFFF............fFFFf............FFFFFFFF\n\
             ....................fffff....................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....................fffff...........fffff....\n\
             FFFFFFFF............fFFFf...........fFFFf....\n\
             fffffffF............fFfFf...........fFfFf....\n\
             fFFFFFfF............fFFFf...........fFFFf....\n\
             fFfffFfF............fffff...........fffff....\n\
             fFfffFfF.....................................\n\
             fFfffFfF.....................................\n\
             fFFFFFfF.....................................\n\
             fffffffF.....................................\n"
        );
    }

    #[test]
    fn test_all_function_patterns_3() {
        let mut qr = qr(3);
        qr.draw_all_function_patterns();
        assert_eq!(qr.to_debug_str(), ALL_FUNCTION_PATTERNS_3);
    }

    #[test]
    fn test_all_function_patterns_7() {
        let mut qr = qr(7);
        qr.draw_all_function_patterns();
        assert_eq!(qr.to_debug_str(), ALL_FUNCTION_PATTERNS_7);
    }

    #[test]
    fn test_empty_modules_match_raw_capacity() {
        for v in Version::all() {
            let mut qr = QR::new(v, ECLevel::M);
            qr.draw_all_function_patterns();
            let empty = qr.grid().iter().filter(|m| **m == super::Module::Empty).count();
            assert_eq!(empty, v.raw_data_modules(), "Version {v}");
        }
    }

    static FINDER_AND_TIMING_1: &str = "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n";

    static ALL_FUNCTION_PATTERNS_3: &str = "\n\
             fffffffFx............Ffffffff\n\
             fFFFFFfFx............FfFFFFFf\n\
             fFfffFfFx............FfFfffFf\n\
             fFfffFfFx............FfFfffFf\n\
             fFfffFfFx............FfFfffFf\n\
             fFFFFFfFx............FfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFx............FFFFFFFF\n\
             xxxxxxfxx............xxxxxxxx\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f.............fffff....\n\
             FFFFFFFFf...........fFFFf....\n\
             fffffffFx...........fFfFf....\n\
             fFFFFFfFx...........fFFFf....\n\
             fFfffFfFx...........fffff....\n\
             fFfffFfFx....................\n\
             fFfffFfFx....................\n\
             fFFFFFfFx....................\n\
             fffffffFx....................\n";

    static ALL_FUNCTION_PATTERNS_7: &str = "\n\
             fffffffFx.........................yyyFfffffff\n\
             fFFFFFfFx.........................yyyFfFFFFFf\n\
             fFfffFfFx.........................yyyFfFfffFf\n\
             fFfffFfFx.........................yyyFfFfffFf\n\
             fFfffFfFx...........fffff.........yyyFfFfffFf\n\
             fFFFFFfFx...........fFFFf.........yyyFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFx...........fFFFf............FFFFFFFF\n\
             xxxxxxfxx...........fffff............xxxxxxxx\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             yyyyyyf......................................\n\
             yyyyyyF......................................\n\
             yyyyyyf.............fffff...........fffff....\n\
             FFFFFFFFf...........fFFFf...........fFFFf....\n\
             fffffffFx...........fFfFf...........fFfFf....\n\
             fFFFFFfFx...........fFFFf...........fFFFf....\n\
             fFfffFfFx...........fffff...........fffff....\n\
             fFfffFfFx....................................\n\
             fFfffFfFx....................................\n\
             fFFFFFfFx....................................\n\
             fffffffFx....................................\n";
}

// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        let reserved = Module::Reserved(Region::Format);
        for &(r, c) in FORMAT_INFO_COORDS_MAIN.iter().chain(FORMAT_INFO_COORDS_SIDE.iter()) {
            self.set(r, c, reserved);
        }
        // Always dark, next to the bottom left separator
        self.set(-8, 8, Module::Func(Color::Dark));
    }

    fn reserve_version_area(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let reserved = Module::Reserved(Region::Version);
        for &(r, c) in VERSION_INFO_COORDS_TR.iter().chain(VERSION_INFO_COORDS_BL.iter()) {
            self.set(r, c, reserved);
        }
    }

    fn draw_format_info(&mut self, format_info: u32) {
        let off = Module::Format(Color::Light);
        let on = Module::Format(Color::Dark);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_SIDE);
    }

    pub fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        let off = Module::Version(Color::Light);
        let on = Module::Version(Color::Dark);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_TR);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_BL);
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }

    fn get_number(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |acc, &(r, c)| acc << 1 | (*self.get(r, c) == Color::Dark) as u32)
    }

    /// Reads the format info back from the symbol, falling back to the second copy when the
    /// first is beyond repair.
    pub fn format_info(&self) -> QRResult<(ECLevel, MaskPattern)> {
        parse_format_info(self.get_number(&FORMAT_INFO_COORDS_MAIN))
            .or_else(|_| parse_format_info(self.get_number(&FORMAT_INFO_COORDS_SIDE)))
    }

    pub fn version_info(&self) -> QRResult<Version> {
        Version::from_info(self.get_number(&VERSION_INFO_COORDS_TR))
            .or_else(|_| Version::from_info(self.get_number(&VERSION_INFO_COORDS_BL)))
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places the codeword bits into the empty modules in zigzag order and fills the
    /// remainder bits with light modules. Returns the number of modules written.
    pub fn draw_encoding_region(&mut self, payload: &BitStream) -> usize {
        let mut coords = EncRegionIter::new(self.ver);
        let mut placed = 0;
        for bit in payload {
            let (r, c) = coords
                .by_ref()
                .find(|&(r, c)| self.get(r, c) == Module::Empty)
                .unwrap_or_else(|| panic!("Encoding region exhausted after {placed} bits"));
            self.set(r, c, Module::Data(Color::from(bit)));
            placed += 1;
        }

        let remainder =
            coords.filter(|&(r, c)| self.get(r, c) == Module::Empty).collect::<Vec<_>>();
        assert_eq!(
            remainder.len(),
            self.ver.remainder_bits(),
            "Unexpected number of modules left after placing {placed} bits"
        );
        for &(r, c) in &remainder {
            self.set(r, c, Module::Data(Color::Light));
        }
        placed += remainder.len();

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in debug");
        placed
    }

    /// Flips every data module selected by the mask. Applying it twice restores the grid.
    pub fn toggle_mask(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
    }

    /// Masks the data modules and writes the matching format info. A symbol can only be
    /// masked once; a second call fails and leaves it untouched.
    pub fn apply_mask(&mut self, pattern: MaskPattern) -> QRResult<()> {
        if let Some(m) = self.mask {
            return Err(QRError::AlreadyMasked(*m));
        }
        self.mask = Some(pattern);
        self.toggle_mask(pattern);
        let format_info = format_info(self.ecl, pattern);
        self.draw_format_info(format_info);
        Ok(())
    }
}


// Output
//------------------------------------------------------------------------------

impl QR {
    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        *self.get(r as i16, c as i16) == Color::Dark
    }

    /// Module colors row by row, surrounded by `quiet_zone` light modules on every side.
    pub fn to_matrix(&self, quiet_zone: usize) -> Vec<Vec<Color>> {
        let total = self.w + 2 * quiet_zone;
        let mut res = vec![vec![Color::Light; total]; total];
        for (r, row) in res[quiet_zone..quiet_zone + self.w].iter_mut().enumerate() {
            for (c, clr) in row[quiet_zone..quiet_zone + self.w].iter_mut().enumerate() {
                *clr = *self.get(r as i16, c as i16);
            }
        }
        res
    }

    /// Text rendering for terminals with a dark background: light modules are drawn as
    /// blocks, with a 4 module quiet zone.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = 4 * module_sz;
        let qr_sz = self.w * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.push(self.get(r, c).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}
