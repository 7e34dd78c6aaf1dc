//! Pixel Formats
//!
//! Pixels narrower than a byte are packed most significant bits first:
//! the first of two GRAY4 pixels is the high nibble, the first of eight
//! BW pixels is bit 7.

use crate::color::Rgba8;
use crate::math::div255;
use crate::math::mix;

/// Layout of pixels in a frame buffer
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PixelFormat {
    /// 1 bit black or white
    Bw,
    /// 2 bit gray
    Gray2,
    /// 4 bit gray
    Gray4,
    /// 16 bit, 5 red 6 green 5 blue, little endian
    Rgb565,
    /// 24 bit, stored as blue, green, red
    Rgb888,
    /// 32 bit, stored as blue, green, red, alpha
    Argb8888,
}

impl PixelFormat {
    pub fn bits_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Bw       => 1,
            PixelFormat::Gray2    => 2,
            PixelFormat::Gray4    => 4,
            PixelFormat::Rgb565   => 16,
            PixelFormat::Rgb888   => 24,
            PixelFormat::Argb8888 => 32,
        }
    }
    /// Pixels smaller than a byte
    pub fn is_packed(&self) -> bool {
        self.bits_per_pixel() < 8
    }
    /// Bytes needed for a row of `width` pixels
    pub fn stride(&self, width: usize) -> usize {
        (width * self.bits_per_pixel() + 7) / 8
    }
    /// Byte holding pixel `x` and the index of the pixel within that byte
    ///
    ///     use cwr::PixelFormat;
    ///     assert_eq!(PixelFormat::Bw.byte_offset(13), (1, 5));
    ///     assert_eq!(PixelFormat::Gray2.byte_offset(13), (3, 1));
    ///     assert_eq!(PixelFormat::Rgb888.byte_offset(13), (39, 0));
    pub fn byte_offset(&self, x: usize) -> (usize, usize) {
        let bits = self.bits_per_pixel();
        if bits < 8 {
            let per_byte = 8 / bits;
            (x / per_byte, x % per_byte)
        } else {
            (x * bits / 8, 0)
        }
    }
    /// Read pixel `x` from a row
    pub fn get(&self, row: &[u8], x: usize) -> Rgba8 {
        match self {
            PixelFormat::Bw => {
                let v = PackedPixels::new(row, 1).get(x);
                if v != 0 { Rgba8::white() } else { Rgba8::black() }
            },
            PixelFormat::Gray2 => Rgba8::gray(PackedPixels::new(row, 2).get(x) * 85),
            PixelFormat::Gray4 => Rgba8::gray(PackedPixels::new(row, 4).get(x) * 17),
            PixelFormat::Rgb565 => {
                let i = x * 2;
                Rgba8::from_rgb565(u16::from_le_bytes([row[i], row[i+1]]))
            },
            PixelFormat::Rgb888 => {
                let i = x * 3;
                Rgba8::rgb(row[i+2], row[i+1], row[i])
            },
            PixelFormat::Argb8888 => {
                let i = x * 4;
                Rgba8::new(row[i+2], row[i+1], row[i], row[i+3])
            },
        }
    }
    /// Write pixel `x` in a row, replacing the current value
    pub fn set(&self, row: &mut [u8], x: usize, c: Rgba8) {
        match self {
            PixelFormat::Bw => {
                let v = if c.luma() >= 128 { 1 } else { 0 };
                PackedPixels::new(row, 1).set(x, v);
            },
            PixelFormat::Gray2 => PackedPixels::new(row, 2).set(x, c.luma() >> 6),
            PixelFormat::Gray4 => PackedPixels::new(row, 4).set(x, c.luma() >> 4),
            PixelFormat::Rgb565 => {
                let i = x * 2;
                row[i .. i+2].copy_from_slice(&c.to_rgb565().to_le_bytes());
            },
            PixelFormat::Rgb888 => {
                let i = x * 3;
                row[i]   = c.b;
                row[i+1] = c.g;
                row[i+2] = c.r;
            },
            PixelFormat::Argb8888 => {
                let i = x * 4;
                row[i]   = c.b;
                row[i+1] = c.g;
                row[i+2] = c.r;
                row[i+3] = c.a;
            },
        }
    }
    /// Blend color `c` into pixel `x` with `alpha`
    ///
    /// Full alpha writes the color, BW pixels are written when alpha is
    /// at least 128
    pub fn blend(&self, row: &mut [u8], x: usize, c: Rgba8, alpha: u8) {
        if alpha == 0 {
            return;
        }
        match self {
            PixelFormat::Bw => {
                if alpha >= 128 {
                    self.set(row, x, c);
                }
            },
            PixelFormat::Gray2 | PixelFormat::Gray4 => {
                if alpha == 255 {
                    self.set(row, x, c);
                } else {
                    let dst = self.get(row, x).r;
                    self.set(row, x, Rgba8::gray(mix(c.luma(), dst, alpha)));
                }
            },
            PixelFormat::Rgb565 | PixelFormat::Rgb888 => {
                if alpha == 255 {
                    self.set(row, x, c.with_alpha(255));
                } else {
                    let p = self.get(row, x);
                    let out = Rgba8::rgb(mix(c.r, p.r, alpha), mix(c.g, p.g, alpha), mix(c.b, p.b, alpha));
                    self.set(row, x, out);
                }
            },
            PixelFormat::Argb8888 => {
                if alpha == 255 {
                    self.set(row, x, c.with_alpha(255));
                } else {
                    let p = self.get(row, x);
                    let a = u32::from(alpha) + u32::from(div255(u32::from(p.a) * (255 - u32::from(alpha))));
                    let out = Rgba8::new(mix(c.r, p.r, alpha), mix(c.g, p.g, alpha), mix(c.b, p.b, alpha), a.min(255) as u8);
                    self.set(row, x, out);
                }
            },
        }
    }
}

/// Pixels of 1, 2 or 4 bits packed into bytes
///
///     use cwr::PackedPixels;
///
///     let mut data = [0u8; 2];
///     let mut px = PackedPixels::new(&mut data[..], 2);
///     px.set(0, 3);
///     px.set(5, 2);
///     assert_eq!(px.get(0), 3);
///     assert_eq!(px.get(5), 2);
///     assert_eq!(px.len(), 8);
///     assert_eq!(data, [0b1100_0000, 0b0010_0000]);
#[derive(Debug)]
pub struct PackedPixels<B> {
    buf: B,
    bits: usize,
}

impl<B: AsRef<[u8]>> PackedPixels<B> {
    /// Access `buf` as pixels of `bits` bits, 1, 2 or 4
    pub fn new(buf: B, bits: usize) -> Self {
        debug_assert!(bits == 1 || bits == 2 || bits == 4);
        Self { buf, bits }
    }
    /// Byte index, shift and mask of pixel `index`
    fn locate(&self, index: usize) -> (usize, usize, u8) {
        let per_byte = 8 / self.bits;
        let shift = (per_byte - 1 - index % per_byte) * self.bits;
        let mask = ((1u16 << self.bits) - 1) as u8;
        (index / per_byte, shift, mask)
    }
    pub fn get(&self, index: usize) -> u8 {
        let (i, shift, mask) = self.locate(index);
        (self.buf.as_ref()[i] >> shift) & mask
    }
    /// Number of pixels
    pub fn len(&self) -> usize {
        self.buf.as_ref().len() * 8 / self.bits
    }
    pub fn is_empty(&self) -> bool {
        self.buf.as_ref().is_empty()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PackedPixels<B> {
    /// Store `value` in pixel `index`, extra high bits are ignored
    pub fn set(&mut self, index: usize, value: u8) {
        let (i, shift, mask) = self.locate(index);
        let byte = &mut self.buf.as_mut()[i];
        *byte = (*byte & !(mask << shift)) | ((value & mask) << shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_msb_first() {
        let mut data = [0u8; 1];
        PackedPixels::new(&mut data[..], 1).set(0, 1);
        assert_eq!(data[0], 0x80);
        let mut data = [0u8; 1];
        PackedPixels::new(&mut data[..], 4).set(0, 0xA);
        assert_eq!(data[0], 0xA0);
        PackedPixels::new(&mut data[..], 4).set(1, 0x5);
        assert_eq!(data[0], 0xA5);
        let mut data = [0xFFu8; 1];
        PackedPixels::new(&mut data[..], 2).set(2, 0);
        assert_eq!(data[0], 0b1111_0011);
    }

    #[test]
    fn gray4_blend_half() {
        let mut row = [0u8; 1];
        PixelFormat::Gray4.blend(&mut row, 1, Rgba8::white(), 128);
        assert_eq!(row[0] & 0x0F, 128 >> 4);
        assert_eq!(row[0] & 0xF0, 0);
    }
}
