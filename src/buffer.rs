//! Frame buffer and rendering buffer

use crate::clip::Rect;
use crate::color::Rgba8;
use crate::error::Error;
use crate::pixfmt::PixelFormat;

use log::trace;

/// Orientation of the display relative to the frame buffer
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Rotation {
    Rotate0,
    /// Display x runs along frame buffer y (bottom to top),
    /// display y runs along frame buffer x
    Rotate90,
}
impl Default for Rotation {
    fn default() -> Rotation {
        Rotation::Rotate0
    }
}

/// Pixel memory of a display
///
/// Width and height are display sizes. With [Rotation::Rotate90] the
/// rows of the memory are display columns.
///
///     use cwr::{FrameBuffer, PixelFormat, Rgba8, Rotation};
///
///     let mut fb = FrameBuffer::new(4, 2, PixelFormat::Rgb565)
///         .with_rotation(Rotation::Rotate90);
///     assert_eq!(fb.stride(), 2 * 2);
///     fb.set_pixel(3, 0, Rgba8::white());
///     assert_eq!(fb.pixel(3, 0), Rgba8::white());
///     assert_eq!(&fb.data()[.. 2], &[0xFF, 0xFF]);
///
/// [Rotation::Rotate90]: enum.Rotation.html#variant.Rotate90
#[derive(Debug,Clone)]
pub struct FrameBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    rotation: Rotation,
}

impl FrameBuffer {
    /// Create a zeroed frame buffer
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        let stride = format.stride(width);
        Self { data: vec![0u8; stride * height], width, height, stride, format,
               rotation: Rotation::Rotate0 }
    }
    /// Wrap existing pixel memory
    pub fn from_data(data: Vec<u8>, width: usize, height: usize, format: PixelFormat) -> Result<Self, Error> {
        let stride = format.stride(width);
        let needed = stride * height;
        if data.len() < needed {
            return Err(Error::BufferTooSmall { needed, got: data.len() });
        }
        Ok(Self { data, width, height, stride, format, rotation: Rotation::Rotate0 })
    }
    /// Set the display rotation, the memory is laid out again and cleared
    pub fn with_rotation(self, rotation: Rotation) -> Self {
        let (pw, ph) = match rotation {
            Rotation::Rotate0  => (self.width, self.height),
            Rotation::Rotate90 => (self.height, self.width),
        };
        let stride = self.format.stride(pw);
        Self { data: vec![0u8; stride * ph], stride, rotation, ..self }
    }
    /// Display width
    pub fn width(&self) -> usize {
        self.width
    }
    /// Display height
    pub fn height(&self) -> usize {
        self.height
    }
    /// Bytes per frame buffer row
    pub fn stride(&self) -> usize {
        self.stride
    }
    pub fn format(&self) -> PixelFormat {
        self.format
    }
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
    /// Width and height of the memory layout
    pub fn physical_size(&self) -> (usize, usize) {
        match self.rotation {
            Rotation::Rotate0  => (self.width, self.height),
            Rotation::Rotate90 => (self.height, self.width),
        }
    }
    fn physical(&self, x: usize, y: usize) -> (usize, usize) {
        match self.rotation {
            Rotation::Rotate0  => (x, y),
            Rotation::Rotate90 => (y, self.width - 1 - x),
        }
    }
    /// Pixel at display position (x,y)
    pub fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        let (px, py) = self.physical(x, y);
        let row = &self.data[py * self.stride .. (py + 1) * self.stride];
        self.format.get(row, px)
    }
    pub fn set_pixel(&mut self, x: usize, y: usize, c: Rgba8) {
        let (px, py) = self.physical(x, y);
        let stride = self.stride;
        let row = &mut self.data[py * stride .. (py + 1) * stride];
        self.format.set(row, px, c);
    }
    /// Set all pixels to a color
    pub fn clear(&mut self, c: Rgba8) {
        let (pw, _) = self.physical_size();
        let format = self.format;
        if self.stride == 0 {
            return;
        }
        for row in self.data.chunks_mut(self.stride) {
            for x in 0 .. pw {
                format.set(row, x, c);
            }
        }
    }
    /// Exclusive access for drawing, released when the lock is dropped
    pub fn lock(&mut self) -> FrameBufferLock<'_> {
        trace!("FRAMEBUFFER: lock");
        FrameBufferLock { fb: self }
    }
}

/// Locked frame buffer
#[derive(Debug)]
pub struct FrameBufferLock<'a> {
    fb: &'a mut FrameBuffer,
}

impl<'a> FrameBufferLock<'a> {
    pub fn format(&self) -> PixelFormat {
        self.fb.format
    }
    pub fn rotation(&self) -> Rotation {
        self.fb.rotation
    }
    pub fn stride(&self) -> usize {
        self.fb.stride
    }
    pub fn display_width(&self) -> usize {
        self.fb.width
    }
    pub fn display_height(&self) -> usize {
        self.fb.height
    }
    /// View of an area given in frame buffer coordinates
    ///
    /// The area is clipped to the frame buffer
    pub fn rendering_buffer(&mut self, area: &Rect) -> RenderingBuffer<'_> {
        let (pw, ph) = self.fb.physical_size();
        let area = area.intersect(&Rect::new(0, 0, pw as i32, ph as i32));
        let stride = self.fb.stride;
        if area.is_empty() {
            return RenderingBuffer::new(&mut [], 0, 0, 0, stride);
        }
        let (byte, x_adjust) = self.fb.format.byte_offset(area.x as usize);
        let start = area.y as usize * stride + byte;
        RenderingBuffer::new(&mut self.fb.data[start ..], x_adjust as i32,
                             area.width as usize, area.height as usize, stride)
    }
}

impl Drop for FrameBufferLock<'_> {
    fn drop(&mut self) {
        trace!("FRAMEBUFFER: unlock");
    }
}

/// Rows of pixel memory starting at the top left corner of an area
///
/// For formats smaller than a byte the first pixel is `x_adjust` pixels
/// into the first byte of each row
#[derive(Debug)]
pub struct RenderingBuffer<'a> {
    buf: &'a mut [u8],
    x_adjust: i32,
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> RenderingBuffer<'a> {
    pub fn new(buf: &'a mut [u8], x_adjust: i32, width: usize, height: usize, stride: usize) -> Self {
        Self { buf, x_adjust, width, height, stride }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn stride(&self) -> usize {
        self.stride
    }
    pub fn x_adjust(&self) -> i32 {
        self.x_adjust
    }
    /// Bytes of row `y`, starting at the first pixel of the area
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        let end = (start + self.stride).min(self.buf.len());
        &self.buf[start .. end]
    }
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = (start + self.stride).min(self.buf.len());
        &mut self.buf[start .. end]
    }
}
