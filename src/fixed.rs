//! Fixed point numbers
//!
//! Coordinates handed to the rasterizer are [Q5] values, integers with
//! 5 fractional bits. Multiplying two [Q5] values gives a [Q10], and a
//! [Q10] times a [Q5] gives a [Q15]; sine and cosine are [Q15] values.
//!
//!     use cwr::{Q5, Q15};
//!
//!     let a = Q5::from(3);
//!     let b = Q5::from(1.5f32);
//!     assert_eq!(i32::from(a), 96);
//!     assert_eq!((a + b).to_f32(), 4.5);
//!     assert_eq!((a * b).to_int(), 4);
//!     assert_eq!(a * Q15::one(), a);
//!
//! [Q5]: struct.Q5.html
//! [Q10]: struct.Q10.html
//! [Q15]: struct.Q15.html

use crate::POLY_BASE_SHIFT;
use crate::POLY_BASE_SIZE;

use std::ops::{Add, Div, Mul, Neg, Sub, Rem};

/// Fixed point number with 5 fractional bits
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct Q5(i32);

/// Fixed point number with 10 fractional bits
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct Q10(i32);

/// Fixed point number with 15 fractional bits
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct Q15(i32);

impl Q5 {
    /// Wrap a raw Q5 value
    pub const fn raw(v: i32) -> Self {
        Q5(v)
    }
    /// Raw value
    pub const fn bits(self) -> i32 {
        self.0
    }
    /// Integral part, truncated towards zero
    pub fn to_int(self) -> i32 {
        self.0 / POLY_BASE_SIZE
    }
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / POLY_BASE_SIZE as f32
    }
    /// Smallest integer not smaller than the value (for positive values)
    pub fn ceil(self) -> i32 {
        if self.0 < 0 {
            self.to_int()
        } else {
            (self.0 + (POLY_BASE_SIZE - 1)) / POLY_BASE_SIZE
        }
    }
    /// Round to nearest, negative halves towards zero
    pub fn round(self) -> i32 {
        let half = POLY_BASE_SIZE / 2;
        if self.0 < 0 {
            Q5((self.0 + 1) - half).to_int()
        } else {
            Q5(self.0 + half).to_int()
        }
    }
    pub fn abs(self) -> Self {
        Q5(self.0.abs())
    }
}

impl Q10 {
    pub const fn raw(v: i32) -> Self {
        Q10(v)
    }
    pub const fn bits(self) -> i32 {
        self.0
    }
    pub fn to_int(self) -> i32 {
        self.0 / (POLY_BASE_SIZE * POLY_BASE_SIZE)
    }
}

impl Q15 {
    pub const fn raw(v: i32) -> Self {
        Q15(v)
    }
    pub const fn bits(self) -> i32 {
        self.0
    }
    /// 1.0
    pub const fn one() -> Self {
        Q15(1 << (3 * POLY_BASE_SHIFT))
    }
}

impl From<i32> for Q5 {
    fn from(v: i32) -> Self {
        Q5(v * POLY_BASE_SIZE)
    }
}
impl From<i16> for Q5 {
    fn from(v: i16) -> Self {
        Q5::from(i32::from(v))
    }
}
impl From<f32> for Q5 {
    fn from(v: f32) -> Self {
        Q5((v * POLY_BASE_SIZE as f32) as i32)
    }
}
impl From<f64> for Q5 {
    fn from(v: f64) -> Self {
        Q5((v * f64::from(POLY_BASE_SIZE)) as i32)
    }
}
impl From<Q10> for Q5 {
    fn from(v: Q10) -> Self {
        Q5(v.0 / POLY_BASE_SIZE)
    }
}
impl From<Q5> for i32 {
    fn from(v: Q5) -> i32 {
        v.0
    }
}

impl Neg for Q5 {
    type Output = Q5;
    fn neg(self) -> Q5 { Q5(-self.0) }
}
impl Add for Q5 {
    type Output = Q5;
    fn add(self, o: Q5) -> Q5 { Q5(self.0 + o.0) }
}
impl Sub for Q5 {
    type Output = Q5;
    fn sub(self, o: Q5) -> Q5 { Q5(self.0 - o.0) }
}
impl Rem for Q5 {
    type Output = Q5;
    fn rem(self, o: Q5) -> Q5 { Q5(self.0 % o.0) }
}
impl Mul for Q5 {
    type Output = Q10;
    fn mul(self, o: Q5) -> Q10 { Q10(self.0 * o.0) }
}
impl Mul<Q15> for Q5 {
    type Output = Q5;
    fn mul(self, o: Q15) -> Q5 {
        Q5(muldiv(self.0, o.0, POLY_BASE_SIZE * POLY_BASE_SIZE * POLY_BASE_SIZE).0)
    }
}
impl Mul<i32> for Q5 {
    type Output = Q5;
    fn mul(self, i: i32) -> Q5 { Q5(self.0 * i) }
}
impl Div<i32> for Q5 {
    type Output = Q5;
    fn div(self, i: i32) -> Q5 { Q5(self.0 / i) }
}
impl Div for Q5 {
    type Output = Q5;
    fn div(self, o: Q5) -> Q5 { Q5(self.0 * POLY_BASE_SIZE / o.0) }
}

impl Neg for Q10 {
    type Output = Q10;
    fn neg(self) -> Q10 { Q10(-self.0) }
}
impl Add for Q10 {
    type Output = Q10;
    fn add(self, o: Q10) -> Q10 { Q10(self.0 + o.0) }
}
impl Mul<Q5> for Q10 {
    type Output = Q15;
    fn mul(self, o: Q5) -> Q15 { Q15(self.0 * o.0) }
}
impl Div<Q5> for Q10 {
    type Output = Q5;
    fn div(self, o: Q5) -> Q5 { Q5(self.0 / o.0) }
}

impl Neg for Q15 {
    type Output = Q15;
    fn neg(self) -> Q15 { Q15(-self.0) }
}
impl Add for Q15 {
    type Output = Q15;
    fn add(self, o: Q15) -> Q15 { Q15(self.0 + o.0) }
}
impl Sub for Q15 {
    type Output = Q15;
    fn sub(self, o: Q15) -> Q15 { Q15(self.0 - o.0) }
}
impl Div<Q5> for Q15 {
    type Output = Q10;
    fn div(self, o: Q5) -> Q10 { Q10(self.0 / o.0) }
}

/// Compute `factor1 * factor2 / divisor` with a 64 bit intermediate
///
/// Returns the quotient and the remainder
///
///     use cwr::muldiv;
///
///     assert_eq!(muldiv(100_000, 100_000, 1_000), (10_000_000, 0));
///     assert_eq!(muldiv(7, 3, 4), (5, 1));
///     assert_eq!(muldiv(-7, 3, 4), (-5, -1));
pub fn muldiv(factor1: i32, factor2: i32, divisor: i32) -> (i32, i32) {
    let p = i64::from(factor1) * i64::from(factor2);
    let d = i64::from(divisor);
    ((p / d) as i32, (p % d) as i32)
}

/// `factor1 * factor2 / divisor` on Q5 values
pub fn muldiv_q5(factor1: Q5, factor2: Q5, divisor: Q5) -> Q5 {
    Q5(muldiv(factor1.0, factor2.0, divisor.0).0)
}

/// Integer square root
pub fn isqrt(n: u32) -> u32 {
    let mut root = 0u32;
    let mut bit = 1u32 << 30;
    let mut n = n;
    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if n >= root + bit {
            n -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

/// Square root of a Q10 value as Q5
pub fn sqrt_q10(v: Q10) -> Q5 {
    Q5(isqrt(v.0.max(0) as u32) as i32)
}

const SINE_TABLE : [u16; 91] = [
    0x0000, 0x023C, 0x0478, 0x06B3, 0x08EE, 0x0B28, 0x0D61, 0x0F99, 0x11D0, 0x1406,
    0x163A, 0x186C, 0x1A9D, 0x1CCB, 0x1EF7, 0x2121, 0x2348, 0x256C, 0x278E, 0x29AC,
    0x2BC7, 0x2DDF, 0x2FF3, 0x3203, 0x3410, 0x3618, 0x381D, 0x3A1C, 0x3C18, 0x3E0E,
    0x4000, 0x41ED, 0x43D4, 0x45B7, 0x4794, 0x496B, 0x4B3D, 0x4D08, 0x4ECE, 0x508E,
    0x5247, 0x53FA, 0x55A6, 0x574C, 0x58EB, 0x5A82, 0x5C13, 0x5D9D, 0x5F1F, 0x609A,
    0x620E, 0x637A, 0x64DE, 0x663A, 0x678E, 0x68DA, 0x6A1E, 0x6B5A, 0x6C8D, 0x6DB8,
    0x6EDA, 0x6FF4, 0x7104, 0x720D, 0x730C, 0x7402, 0x74EF, 0x75D3, 0x76AE, 0x7780,
    0x7848, 0x7907, 0x79BC, 0x7A68, 0x7B0B, 0x7BA3, 0x7C33, 0x7CB8, 0x7D34, 0x7DA6,
    0x7E0E, 0x7E6D, 0x7EC1, 0x7F0C, 0x7F4C, 0x7F83, 0x7FB0, 0x7FD3, 0x7FEC, 0x7FFB, 0x8000,
];

/// Sine of a whole number of degrees
pub fn sine(degrees: i32) -> Q15 {
    let i = ((degrees % 360) + 360) % 360;
    let i = i as usize;
    if i <= 90 {
        Q15(i32::from(SINE_TABLE[i]))
    } else if i <= 180 {
        Q15(i32::from(SINE_TABLE[180 - i]))
    } else if i <= 270 {
        Q15(-i32::from(SINE_TABLE[i - 180]))
    } else {
        Q15(-i32::from(SINE_TABLE[360 - i]))
    }
}

/// Sine of an angle in Q5 degrees, interpolated between whole degrees
pub fn sine_q5(angle: Q5) -> Q15 {
    let full = Q5::from(360);
    let a = Q5(((angle.0 % full.0) + full.0) % full.0);
    let fraction = a.0 % POLY_BASE_SIZE;
    let low = sine(a.to_int());
    if fraction == 0 {
        return low;
    }
    let high = sine(a.to_int() + 1);
    Q15(muldiv((high - low).0, fraction, POLY_BASE_SIZE).0) + low
}

const ARCSINE_TABLE : [u8; 91] = [
     0,  0,  1,  1,  2,  2,  3,  3,  4,  4,  4,  5,  5,  6,  6,
     7,  7,  8,  8,  9,  9,  9, 10, 10, 11, 11, 12, 12, 13, 13,
    14, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20,
    21, 21, 22, 22, 23, 23, 23, 24, 24, 25, 25, 26, 26, 27, 27,
    28, 28, 29, 29, 30, 31, 31, 32, 32, 33, 33, 34, 34, 35, 35,
    36, 36, 37, 38, 38, 39, 39, 40, 40, 41, 42, 42, 43, 43, 44, 45,
];

/// Arcsine in whole degrees of a value in [-1,1]
///
/// Values outside of [-1,1] give 0
pub fn arcsine(v: Q10) -> i32 {
    let one = POLY_BASE_SIZE * POLY_BASE_SIZE;
    if v.0 < 0 {
        return -arcsine(Q10(-v.0));
    }
    if v.0 > one {
        return 0;
    }
    // sqrt(1/2) as Q10, the table covers 0 to 45 degrees
    if v.0 > 724 {
        let c = isqrt((one * one - v.0 * v.0) as u32) as i32;
        return 90 - arcsine(Q10(c));
    }
    i32::from(ARCSINE_TABLE[((v.0 + 3) >> 3) as usize])
}

/// Angle of the vector (x,y) and its length
///
/// Angles follow a clock: 0 degrees points up (negative y),
/// 90 degrees points right
///
///     use cwr::{angle, Q5};
///
///     assert_eq!(angle(Q5::from(0), Q5::from(-10)), (0, Q5::from(10)));
///     assert_eq!(angle(Q5::from(10), Q5::from(0)).0, 90);
///     assert_eq!(angle(Q5::from(0), Q5::from(10)).0, 180);
///     assert_eq!(angle(Q5::from(-10), Q5::from(0)).0, 270);
pub fn angle(x: Q5, y: Q5) -> (i32, Q5) {
    let zero = Q5(0);
    if x >= zero {
        if y >= zero {
            let (a, d) = quadrant_angle(x, y);
            (90 + a, d)
        } else {
            let (a, d) = quadrant_angle(x, -y);
            (90 - a, d)
        }
    } else if y >= zero {
        let (a, d) = quadrant_angle(-x, y);
        (270 - a, d)
    } else {
        let (a, d) = quadrant_angle(-x, -y);
        (270 + a, d)
    }
}

/// Angle from the x axis in the first quadrant
fn quadrant_angle(x: Q5, y: Q5) -> (i32, Q5) {
    // The table is more precise below 45 degrees
    if x < y {
        let (a, d) = quadrant_angle(y, x);
        return (90 - a, d);
    }
    let d = sqrt_q10(x * x + y * y);
    if d.0 == 0 {
        return (0, d);
    }
    let (s, _) = muldiv(y.0, POLY_BASE_SIZE * POLY_BASE_SIZE, d.0);
    (arcsine(Q10(s)), d)
}

/// Cosine of a whole number of degrees
pub fn cosine(degrees: i32) -> Q15 {
    sine(90 - degrees)
}

/// Cosine of an angle in Q5 degrees
pub fn cosine_q5(angle: Q5) -> Q15 {
    sine_q5(Q5::from(90) - angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_quadrants() {
        assert_eq!(sine(0), Q15::raw(0));
        assert_eq!(sine(90), Q15::one());
        assert_eq!(sine(270), -Q15::one());
        assert_eq!(sine(-90), -Q15::one());
        assert_eq!(cosine(0), Q15::one());
        assert_eq!(sine(30).bits(), 0x4000);
        assert_eq!(sine(150), sine(30));
        assert_eq!(sine(210), -sine(30));
    }
    #[test]
    fn sine_interpolates() {
        let s = sine_q5(Q5::from(30.5f32)).bits();
        assert!(s > sine(30).bits() && s < sine(31).bits());
        assert_eq!(sine_q5(Q5::from(45)), sine(45));
    }
    #[test]
    fn rounding() {
        assert_eq!(Q5::from(2.5f32).round(), 3);
        assert_eq!(Q5::from(-2.5f32).round(), -2);
        assert_eq!(Q5::from(2.25f32).ceil(), 3);
        assert_eq!(Q5::from(-2.25f32).ceil(), -2);
        assert_eq!(Q5::from(7).ceil(), 7);
    }
    #[test]
    fn square_root() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(99), 9);
        assert_eq!(isqrt(100), 10);
        assert_eq!(sqrt_q10(Q5::from(3) * Q5::from(3)), Q5::from(3));
    }
}
