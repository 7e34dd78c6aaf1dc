//! Errors

use crate::pixfmt::PixelFormat;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Painter draws {painter:?} pixels, frame buffer holds {frame_buffer:?}")]
    IncompatiblePainter { painter: PixelFormat, frame_buffer: PixelFormat },
    #[error("Frame buffer too small, expected {needed} bytes, found {got}")]
    BufferTooSmall { needed: usize, got: usize },
    #[error("Palette has {colors} colors, bitmap uses index {index}")]
    PaletteTooSmall { index: u8, colors: usize },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
