//! Colors

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Create new opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
    /// Opaque gray
    pub fn gray(g: u8) -> Self {
        Self::new(g, g, g, 255)
    }
    /// Same color with a different alpha
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
    /// Integer luma, used by the gray scale and black/white pixel formats
    ///
    ///     use cwr::Rgba8;
    ///     assert_eq!(Rgba8::white().luma(), 255);
    ///     assert_eq!(Rgba8::black().luma(), 0);
    ///     assert_eq!(Rgba8::gray(77).luma(), 77);
    pub fn luma(&self) -> u8 {
        let (r,g,b) = (u32::from(self.r), u32::from(self.g), u32::from(self.b));
        ((r * 77 + g * 150 + b * 29 + 128) >> 8) as u8
    }
    /// Pack into 5-6-5 bits
    ///
    ///     use cwr::Rgba8;
    ///     assert_eq!(Rgba8::rgb(255, 0, 0).to_rgb565(), 0xF800);
    ///     assert_eq!(Rgba8::rgb(0, 255, 0).to_rgb565(), 0x07E0);
    ///     assert_eq!(Rgba8::rgb(0, 0, 255).to_rgb565(), 0x001F);
    pub fn to_rgb565(&self) -> u16 {
        ((u16::from(self.r) & 0xF8) << 8) | ((u16::from(self.g) & 0xFC) << 3) | (u16::from(self.b) >> 3)
    }
    /// Unpack from 5-6-5 bits, replicating the high bits into the low bits
    pub fn from_rgb565(p: u16) -> Self {
        let r = ((p >> 11) & 0x1F) as u8;
        let g = ((p >> 5) & 0x3F) as u8;
        let b = (p & 0x1F) as u8;
        Self::rgb((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn rgb565_round_trip_keeps_extremes() {
        for &c in [Rgba8::white(), Rgba8::black(), Rgba8::rgb(255,0,0), Rgba8::rgb(0,0,255)].iter() {
            assert_eq!(Rgba8::from_rgb565(c.to_rgb565()), c);
        }
        let c = Rgba8::from_rgb565(Rgba8::rgb(100, 150, 200).to_rgb565());
        assert!((i32::from(c.r) - 100).abs() < 8);
        assert!((i32::from(c.g) - 150).abs() < 4);
        assert!((i32::from(c.b) - 200).abs() < 8);
    }
}
