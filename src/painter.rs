//! Painters
//!
//! A [Painter] blends the coverage of a span into one row of the frame
//! buffer. [PixelPainter] does this for every [PixelFormat], pulling the
//! color of each pixel from a [ColorSource].
//!
//! [Painter]: trait.Painter.html
//! [PixelPainter]: struct.PixelPainter.html
//! [PixelFormat]: ../pixfmt/enum.PixelFormat.html
//! [ColorSource]: trait.ColorSource.html

use crate::color::Rgba8;
use crate::error::Error;
use crate::math::combine_alpha;
use crate::math::div255;
use crate::pixfmt::PixelFormat;

/// Offset and alpha state shared by all painters
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct PainterBase {
    /// Position of the drawn area within the widget
    pub offset_x: i32,
    pub offset_y: i32,
    /// Alpha of the widget, set for each draw
    pub widget_alpha: u8,
    /// Alpha of the painter itself
    pub alpha: u8,
}
impl Default for PainterBase {
    fn default() -> Self {
        Self { offset_x: 0, offset_y: 0, widget_alpha: 255, alpha: 255 }
    }
}

/// Blend coverage values into a row of pixels
pub trait Painter {
    /// Blend `covers` into `row` starting at pixel `x`
    ///
    /// `row` starts at the first pixel of the drawn area, `x_adjust` is
    /// the index of that pixel within the first byte for formats smaller
    /// than a byte. `x` and `y` are relative to the drawn area.
    fn render(&mut self, row: &mut [u8], x: i32, x_adjust: i32, y: i32, covers: &[u8]);
    /// Pixel format written by this painter
    fn format(&self) -> PixelFormat;
    fn base(&self) -> &PainterBase;
    fn base_mut(&mut self) -> &mut PainterBase;

    fn set_offset(&mut self, x: i32, y: i32) {
        let b = self.base_mut();
        b.offset_x = x;
        b.offset_y = y;
    }
    fn set_widget_alpha(&mut self, alpha: u8) {
        self.base_mut().widget_alpha = alpha;
    }
    fn widget_alpha(&self) -> u8 {
        self.base().widget_alpha
    }
    fn set_alpha(&mut self, alpha: u8) {
        self.base_mut().alpha = alpha;
    }
    fn alpha(&self) -> u8 {
        self.base().alpha
    }
}

/// Colors of consecutive pixels on a row
pub trait ColorSource {
    /// Start a run at widget position (x,y)
    ///
    /// Returns false if nothing on the row can be drawn
    fn render_init(&mut self, x: i32, y: i32) -> bool;
    /// Color of the next pixel, None skips the pixel
    fn render_next(&mut self) -> Option<Rgba8>;
}

/// Single color
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct SolidColor {
    color: Rgba8,
}
impl SolidColor {
    pub fn new(color: Rgba8) -> Self {
        Self { color }
    }
    pub fn color(&self) -> Rgba8 {
        self.color
    }
    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }
}
impl ColorSource for SolidColor {
    fn render_init(&mut self, _x: i32, _y: i32) -> bool {
        self.color.a != 0
    }
    fn render_next(&mut self) -> Option<Rgba8> {
        Some(self.color)
    }
}

/// Position within a bitmap placed in a widget
#[derive(Debug,Clone)]
struct BitmapCursor {
    width: i32,
    height: i32,
    offset_x: i32,
    offset_y: i32,
    tiled: bool,
    cur_x: i32,
    cur_y: i32,
}

impl BitmapCursor {
    fn new(width: usize, height: usize) -> Self {
        Self { width: width as i32, height: height as i32,
               offset_x: 0, offset_y: 0, tiled: false, cur_x: 0, cur_y: 0 }
    }
    fn init(&mut self, x: i32, y: i32) -> bool {
        if self.width <= 0 || self.height <= 0 {
            return false;
        }
        let (bx, by) = (x - self.offset_x, y - self.offset_y);
        if self.tiled {
            self.cur_y = by.rem_euclid(self.height);
        } else if by < 0 || by >= self.height {
            return false;
        } else {
            self.cur_y = by;
        }
        self.cur_x = bx;
        true
    }
    /// Index of the next pixel, None if it lies outside the bitmap
    fn next(&mut self) -> Option<usize> {
        let mut bx = self.cur_x;
        self.cur_x += 1;
        if self.tiled {
            bx = bx.rem_euclid(self.width);
        } else if bx < 0 || bx >= self.width {
            return None;
        }
        Some((self.cur_y * self.width + bx) as usize)
    }
}

/// Colors taken from a bitmap
///
/// The bitmap is placed at an offset within the widget. Outside of the
/// bitmap nothing is drawn, unless the bitmap is tiled.
#[derive(Debug,Clone)]
pub struct BitmapSource {
    pixels: Vec<Rgba8>,
    cursor: BitmapCursor,
}

impl BitmapSource {
    /// Bitmap of `width` x `height` pixels stored row by row
    pub fn new(pixels: Vec<Rgba8>, width: usize, height: usize) -> Result<Self, Error> {
        let needed = width * height;
        if pixels.len() < needed {
            return Err(Error::BufferTooSmall { needed, got: pixels.len() });
        }
        Ok(Self { pixels, cursor: BitmapCursor::new(width, height) })
    }
    /// Position of the top left corner of the bitmap within the widget
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.cursor.offset_x = x;
        self.cursor.offset_y = y;
        self
    }
    /// Repeat the bitmap in both directions
    pub fn tiled(mut self, tiled: bool) -> Self {
        self.cursor.tiled = tiled;
        self
    }
    pub fn width(&self) -> usize {
        self.cursor.width as usize
    }
    pub fn height(&self) -> usize {
        self.cursor.height as usize
    }
}

impl ColorSource for BitmapSource {
    fn render_init(&mut self, x: i32, y: i32) -> bool {
        self.cursor.init(x, y)
    }
    fn render_next(&mut self) -> Option<Rgba8> {
        self.cursor.next().map(|i| self.pixels[i])
    }
}

/// Colors looked up in a palette by 8 bit indices (L8)
///
/// Placement and tiling are the same as for [BitmapSource].
///
///     use cwr::{ColorSource, PaletteSource, Rgba8};
///
///     let red = Rgba8::rgb(255, 0, 0);
///     let palette = vec![Rgba8::black(), red];
///     let mut src = PaletteSource::new(vec![1, 0, 0, 1], palette, 2, 2).unwrap();
///     assert!(src.render_init(0, 1));
///     assert_eq!(src.render_next(), Some(Rgba8::black()));
///     assert_eq!(src.render_next(), Some(red));
///
/// [BitmapSource]: struct.BitmapSource.html
#[derive(Debug,Clone)]
pub struct PaletteSource {
    indices: Vec<u8>,
    palette: Vec<Rgba8>,
    cursor: BitmapCursor,
}

impl PaletteSource {
    /// Bitmap of `width` x `height` palette indices stored row by row
    ///
    /// Every index must refer to a color of `palette`
    pub fn new(indices: Vec<u8>, palette: Vec<Rgba8>, width: usize, height: usize) -> Result<Self, Error> {
        let needed = width * height;
        if indices.len() < needed {
            return Err(Error::BufferTooSmall { needed, got: indices.len() });
        }
        if let Some(&index) = indices[.. needed].iter().find(|&&i| usize::from(i) >= palette.len()) {
            return Err(Error::PaletteTooSmall { index, colors: palette.len() });
        }
        Ok(Self { indices, palette, cursor: BitmapCursor::new(width, height) })
    }
    /// Position of the top left corner of the bitmap within the widget
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.cursor.offset_x = x;
        self.cursor.offset_y = y;
        self
    }
    /// Repeat the bitmap in both directions
    pub fn tiled(mut self, tiled: bool) -> Self {
        self.cursor.tiled = tiled;
        self
    }
    pub fn palette(&self) -> &[Rgba8] {
        &self.palette
    }
    /// Replace a color of the palette, the indices are kept
    pub fn set_color(&mut self, index: u8, color: Rgba8) {
        if let Some(c) = self.palette.get_mut(usize::from(index)) {
            *c = color;
        }
    }
}

impl ColorSource for PaletteSource {
    fn render_init(&mut self, x: i32, y: i32) -> bool {
        self.cursor.init(x, y)
    }
    fn render_next(&mut self) -> Option<Rgba8> {
        let i = self.cursor.next()?;
        Some(self.palette[usize::from(self.indices[i])])
    }
}

/// Painter for any [PixelFormat] using colors from a [ColorSource]
///
/// Each pixel is blended with `cover * (source alpha * painter alpha) *
/// widget alpha`.
///
/// [PixelFormat]: ../pixfmt/enum.PixelFormat.html
/// [ColorSource]: trait.ColorSource.html
#[derive(Debug,Clone)]
pub struct PixelPainter<S> {
    format: PixelFormat,
    source: S,
    base: PainterBase,
}

impl<S: ColorSource> PixelPainter<S> {
    pub fn new(format: PixelFormat, source: S) -> Self {
        Self { format, source, base: PainterBase::default() }
    }
    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: ColorSource> Painter for PixelPainter<S> {
    fn render(&mut self, row: &mut [u8], x: i32, x_adjust: i32, y: i32, covers: &[u8]) {
        let b = self.base;
        if ! self.source.render_init(x + b.offset_x, y + b.offset_y) {
            return;
        }
        let adjust = if self.format.is_packed() { x_adjust } else { 0 };
        for (i, &cover) in covers.iter().enumerate() {
            let c = match self.source.render_next() {
                Some(c) => c,
                None => continue,
            };
            let a = div255(u32::from(c.a) * u32::from(b.alpha));
            let alpha = combine_alpha(cover, a, b.widget_alpha);
            let px = x + adjust + i as i32;
            self.format.blend(row, px as usize, c, alpha);
        }
    }
    fn format(&self) -> PixelFormat {
        self.format
    }
    fn base(&self) -> &PainterBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut PainterBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_outside_is_skipped() {
        let px = vec![Rgba8::white(); 4];
        let mut src = BitmapSource::new(px, 2, 2).unwrap().with_offset(1, 0);
        assert!(src.render_init(0, 1));
        assert_eq!(src.render_next(), None);
        assert_eq!(src.render_next(), Some(Rgba8::white()));
        assert_eq!(src.render_next(), Some(Rgba8::white()));
        assert_eq!(src.render_next(), None);
        assert!(! src.render_init(0, 2));
    }

    #[test]
    fn bitmap_tiles() {
        let px = vec![Rgba8::black(), Rgba8::white()];
        let mut src = BitmapSource::new(px, 2, 1).unwrap().tiled(true);
        assert!(src.render_init(-1, 5));
        let row : Vec<_> = (0 .. 4).filter_map(|_| src.render_next()).collect();
        assert_eq!(row, vec![Rgba8::white(), Rgba8::black(), Rgba8::white(), Rgba8::black()]);
    }

    #[test]
    fn painter_alpha_scales_cover() {
        let mut p = PixelPainter::new(PixelFormat::Rgb888, SolidColor::new(Rgba8::white()));
        p.set_alpha(128);
        let mut row = [0u8; 6];
        p.render(&mut row, 0, 0, 0, &[255, 0]);
        assert_eq!(row, [128, 128, 128, 0, 0, 0]);
    }

    #[test]
    fn palette_lookup() {
        let palette = vec![Rgba8::black(), Rgba8::white(), Rgba8::gray(128)];
        let idx = vec![0, 1, 2, 1, 0, 2];
        let mut src = PaletteSource::new(idx, palette, 3, 2).unwrap().with_offset(1, 0);
        assert!(src.render_init(0, 1));
        let row : Vec<_> = (0 .. 5).map(|_| src.render_next()).collect();
        assert_eq!(row, vec![None, Some(Rgba8::white()), Some(Rgba8::black()),
                             Some(Rgba8::gray(128)), None]);
        assert!(! src.render_init(0, 2));

        src.set_color(2, Rgba8::rgb(0, 0, 255));
        src.set_color(9, Rgba8::white());
        assert_eq!(src.palette().len(), 3);
        assert!(src.render_init(3, 0));
        assert_eq!(src.render_next(), Some(Rgba8::rgb(0, 0, 255)));
    }

    #[test]
    fn palette_tiles() {
        let mut src = PaletteSource::new(vec![1, 0], vec![Rgba8::black(), Rgba8::white()], 2, 1)
            .unwrap().tiled(true);
        assert!(src.render_init(-1, 3));
        let row : Vec<_> = (0 .. 4).filter_map(|_| src.render_next()).collect();
        assert_eq!(row, vec![Rgba8::black(), Rgba8::white(), Rgba8::black(), Rgba8::white()]);
    }

    #[test]
    fn palette_must_cover_indices() {
        match PaletteSource::new(vec![0, 3], vec![Rgba8::black(); 2], 2, 1) {
            Err(Error::PaletteTooSmall { index, colors }) => {
                assert_eq!(index, 3);
                assert_eq!(colors, 2);
            },
            _ => panic!("expected a palette error"),
        }
        assert!(PaletteSource::new(vec![0], vec![Rgba8::black()], 2, 1).is_err());
    }
}
