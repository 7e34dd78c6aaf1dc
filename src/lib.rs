//! Anti-aliased scanline rasterizer for a fixed memory budget
//!
//! How does this work
//!
//!    arena  = Arena( bytes )                      -- set up once
//!    canvas = Canvas( arena, fb.lock(), widget, invalidated, painter )
//!  Outline Operations
//!    canvas.move_to / line_to
//!      Rasterizer::move_to / line_to
//!        Outline::move_to / line_to
//!          render_line()
//!            render_scanline()   -- one call per crossed scanline
//!              set_cur_cell()    -- store finished cell in the arena
//!     Output: Cells with X, Y, Cover, and Area
//!  Render to Frame Buffer
//!    canvas.render(alpha)
//!      Rasterizer::render(renderer)
//!        Outline::cells()  -- close contour, sort cells once
//!        merge cells, calculate_alpha()
//!        Scanline::add_cell / add_span
//!        Renderer::render(scanline) -- when the scanline is ready
//!          Painter::render(row, x, x_adjust, y, covers)
//!
//! When an outline needs more cells than the arena holds the draw fails
//! with `false`; the caller draws a smaller area and tries again.
//!
//! ```
//! use cwr::{Arena, Canvas, FrameBuffer, PixelFormat, PixelPainter, Rect, Rgba8, SolidColor};
//!
//! let mut arena = Arena::new(8192);
//! let mut fb = FrameBuffer::new(20, 20, PixelFormat::Rgb888);
//! fb.clear(Rgba8::black());
//! let mut painter = PixelPainter::new(PixelFormat::Rgb888, SolidColor::new(Rgba8::white()));
//! {
//!     let area = Rect::new(0, 0, 20, 20);
//!     let mut canvas = Canvas::new(&mut arena, fb.lock(), area, area, &mut painter).unwrap();
//!     canvas.move_to(0, 0);
//!     canvas.line_to(10, 0);
//!     canvas.line_to(0, 10);
//!     assert!(canvas.render(255));
//! }
//! assert_eq!(fb.pixel(1, 1), Rgba8::white());
//! assert_eq!(fb.pixel(15, 15), Rgba8::black());
//! ```

pub mod arena;
pub mod buffer;
pub mod canvas;
pub mod cell;
pub mod clip;
pub mod color;
pub mod error;
pub mod fixed;
pub mod math;
pub mod painter;
pub mod path_storage;
pub mod pixfmt;
pub mod ppm;
pub mod raster;
pub mod render;
pub mod scan;
pub mod shape;

pub use crate::arena::*;
pub use crate::buffer::*;
pub use crate::canvas::*;
pub use crate::cell::*;
pub use crate::clip::*;
pub use crate::color::*;
pub use crate::error::*;
pub use crate::fixed::*;
pub use crate::math::*;
pub use crate::painter::*;
pub use crate::path_storage::*;
pub use crate::pixfmt::*;
pub use crate::raster::*;
pub use crate::render::*;
pub use crate::scan::*;
pub use crate::shape::*;

/// Number of bits reserved for the fractional part of a coordinate
pub const POLY_BASE_SHIFT : i32 = 5;
/// Size of one pixel in sub-pixel units
pub const POLY_BASE_SIZE  : i32 = 1 << POLY_BASE_SHIFT;
/// Mask of the fractional part of a coordinate
pub const POLY_BASE_MASK  : i32 = POLY_BASE_SIZE - 1;

/// Number of bits of a coverage value
pub const AA_SHIFT : i32 = 8;
/// Full coverage plus one
pub const AA_NUM   : i32 = 1 << AA_SHIFT;
/// Full coverage
pub const AA_MASK  : i32 = AA_NUM - 1;
/// Coverage period for the even-odd rule
pub const AA_2NUM  : i32 = AA_NUM * 2;
/// Mask of the even-odd coverage period
pub const AA_2MASK : i32 = AA_2NUM - 1;

/// Consumer of completed scanlines
pub trait Render {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &scan::Scanline<'_>);
}

/// Source of outline vertices, drawn through a [Canvas]
///
/// [Canvas]: canvas/struct.Canvas.html
pub trait VertexSource {
    fn vertices(&self) -> Vec<path_storage::Vertex>;
}
