use std::ops::{Add, AddAssign, Mul, MulAssign};

// Element of GF(2^8) reduced by x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub const PRIMITIVE_POLY: u16 = 0x11D;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct G(pub u8);

impl G {
    pub const ZERO: G = G(0);
    pub const ONE: G = G(1);
    pub const GENERATOR: G = G(0x02);
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        G(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        G(multiply(self.0, rhs.0))
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Russian peasant multiplication, reducing by the primitive polynomial after every shift.
pub fn multiply(x: u8, y: u8) -> u8 {
    let x = x as u16;
    let mut z: u16 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * PRIMITIVE_POLY);
        z ^= ((y as u16 >> i) & 1) * x;
    }
    debug_assert!(z >> 8 == 0, "Product escaped the field: {z}");
    z as u8
}
