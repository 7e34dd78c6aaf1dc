//! Canvas
//!
//! Drawing surface for a single widget. Shapes are given in widget
//! coordinates; the canvas moves them into the invalidated area, rotates
//! them to frame buffer coordinates and leaves out edges that cannot
//! touch the area.

use crate::arena::Arena;
use crate::arena::MemoryUsage;
use crate::buffer::FrameBufferLock;
use crate::buffer::Rotation;
use crate::clip::outside_flags;
use crate::clip::Rect;
use crate::error::Error;
use crate::fixed::Q5;
use crate::math::div255;
use crate::painter::Painter;
use crate::path_storage::PathCommand;
use crate::raster::FillingRule;
use crate::raster::Rasterizer;
use crate::render::Renderer;
use crate::VertexSource;

use log::{debug, warn};

/// Outline of one widget, drawn into a locked frame buffer
///
/// The frame buffer stays locked until the canvas is dropped
pub struct Canvas<'a, P: Painter + ?Sized> {
    rasterizer: Rasterizer<'a>,
    usage: &'a mut MemoryUsage,
    lock: FrameBufferLock<'a>,
    painter: &'a mut P,
    rotation: Rotation,
    widget_width: i32,
    widget_alpha: u8,
    enough_memory: bool,
    scanline_width: usize,
    /// Drawn area in frame buffer coordinates, absolute
    area: Rect,
    offset_x: i32,
    offset_y: i32,
    invalidated_x: Q5,
    invalidated_y: Q5,
    invalidated_width: Q5,
    invalidated_height: Q5,
    pen_up: bool,
    pen_has_been_down: bool,
    previous_x: Q5,
    previous_y: Q5,
    previous_outside: u8,
    pen_down_outside: u8,
    initial_x: Q5,
    initial_y: Q5,
}

impl<'a, P: Painter + ?Sized> Canvas<'a, P> {
    /// Create a canvas for the part of a widget that must be redrawn
    ///
    /// `widget` is the position and size of the widget on the display,
    /// `invalidated` is relative to the widget. The scanline width of
    /// the arena is set to the width of the area to redraw.
    pub fn new(arena: &'a mut Arena, lock: FrameBufferLock<'a>, widget: Rect,
               invalidated: Rect, painter: &'a mut P) -> Result<Self, Error> {
        if painter.format() != lock.format() {
            return Err(Error::IncompatiblePainter { painter: painter.format(),
                                                    frame_buffer: lock.format() });
        }
        // Area to redraw, relative and absolute
        let mut dirty = Rect::new(0, 0, widget.width, widget.height).intersect(&invalidated);
        let mut absolute = dirty.translate(widget.x, widget.y);

        let rotation = lock.rotation();
        if rotation == Rotation::Rotate90 {
            dirty = dirty.rotate90(widget.width);
            absolute = absolute.rotate90(lock.display_width() as i32);
        }

        let enough_memory = arena.set_scanline_width(dirty.width as usize);
        let scanline_width = arena.scanline_width();
        if ! enough_memory {
            warn!("CANVAS: not enough memory for a scanline of {} pixels", dirty.width);
        }
        let (outline, scanline, usage) = arena.parts();
        let mut rasterizer = Rasterizer::from_parts(outline, scanline);
        rasterizer.reset();
        rasterizer.set_max_render_y(absolute.height);
        debug!("CANVAS: dirty {:?} absolute {:?}", dirty, absolute);

        Ok(Self {
            rasterizer, usage, lock, painter, rotation,
            widget_width: widget.width,
            widget_alpha: 255,
            enough_memory,
            scanline_width,
            area: absolute,
            offset_x: dirty.x,
            offset_y: dirty.y,
            invalidated_x: Q5::from(dirty.x),
            invalidated_y: Q5::from(dirty.y),
            invalidated_width: Q5::from(dirty.width),
            invalidated_height: Q5::from(dirty.height),
            pen_up: true,
            pen_has_been_down: false,
            previous_x: Q5::default(),
            previous_y: Q5::default(),
            previous_outside: 0,
            pen_down_outside: 0,
            initial_x: Q5::default(),
            initial_y: Q5::default(),
        })
    }
    /// Alpha of the widget, combined with the alpha given to render()
    pub fn set_widget_alpha(&mut self, alpha: u8) {
        self.widget_alpha = alpha;
    }
    pub fn set_filling_rule(&mut self, rule: FillingRule) {
        self.rasterizer.set_filling_rule(rule);
    }
    /// Scanline of the arena holds the drawn area
    pub fn has_enough_memory(&self) -> bool {
        self.enough_memory
    }
    /// Area drawn, in absolute frame buffer coordinates
    pub fn area(&self) -> Rect {
        self.area
    }
    pub fn was_outline_too_complex(&self) -> bool {
        self.rasterizer.was_outline_too_complex()
    }

    /// Widget coordinates to coordinates within the drawn area
    fn transform(&self, x: Q5, y: Q5) -> (Q5, Q5) {
        let (x, y) = match self.rotation {
            Rotation::Rotate0  => (x, y),
            Rotation::Rotate90 => (y, Q5::from(self.widget_width) - x),
        };
        (x - self.invalidated_x, y - self.invalidated_y)
    }
    fn outside(&self, x: Q5, y: Q5) -> u8 {
        outside_flags(x, y, self.invalidated_width, self.invalidated_height)
    }

    /// Start a new contour at (x,y), the previous contour is closed
    pub fn move_to<T: Into<Q5>>(&mut self, x: T, y: T) {
        if ! self.enough_memory {
            return;
        }
        if ! self.pen_up {
            self.close();
        }
        let (x, y) = self.transform(x.into(), y.into());
        let outside = self.outside(x, y);
        if outside != 0 {
            self.pen_up = true;
        } else {
            self.pen_down_outside = outside;
            self.rasterizer.move_to(x.bits(), y.bits());
            self.pen_up = false;
            self.pen_has_been_down = true;
        }
        self.initial_x = x;
        self.initial_y = y;
        self.previous_x = x;
        self.previous_y = y;
        self.previous_outside = outside;
    }
    /// Draw a line from the current position to (x,y)
    pub fn line_to<T: Into<Q5>>(&mut self, x: T, y: T) {
        if ! self.enough_memory {
            return;
        }
        let (x, y) = self.transform(x.into(), y.into());
        let mut outside = self.outside(x, y);
        if self.previous_outside == 0 {
            // Only after close() is the pen up on an inside point
            if self.pen_up {
                self.pen_down();
            }
            self.rasterizer.line_to(x.bits(), y.bits());
        } else if outside == 0 || (self.previous_outside & outside) == 0 {
            // Inside, or outside on a different side than the previous point
            if self.pen_up {
                self.pen_down();
            } else {
                self.rasterizer.line_to(self.previous_x.bits(), self.previous_y.bits());
            }
            self.rasterizer.line_to(x.bits(), y.bits());
        } else {
            // Still outside on the same side
            outside &= self.previous_outside;
        }
        self.previous_x = x;
        self.previous_y = y;
        self.previous_outside = outside;
    }
    /// Start drawing at the previous point
    fn pen_down(&mut self) {
        self.pen_down_outside = self.previous_outside;
        self.rasterizer.move_to(self.previous_x.bits(), self.previous_y.bits());
        self.pen_up = false;
        self.pen_has_been_down = true;
    }
    /// Close the current contour
    ///
    /// The pen returns to the start of the contour and is lifted, a
    /// contour that never touched the area adds nothing.
    pub fn close(&mut self) {
        if ! self.pen_up && (self.previous_outside & self.pen_down_outside) == 0 {
            if self.previous_outside != 0 {
                self.rasterizer.line_to(self.previous_x.bits(), self.previous_y.bits());
            }
            self.rasterizer.line_to(self.initial_x.bits(), self.initial_y.bits());
        }
        self.pen_up = true;
        self.previous_x = self.initial_x;
        self.previous_y = self.initial_y;
        self.previous_outside = self.outside(self.initial_x, self.initial_y);
    }
    /// Add all vertices of a path
    pub fn add_path<V: VertexSource + ?Sized>(&mut self, path: &V) {
        for v in path.vertices() {
            match v.cmd {
                PathCommand::MoveTo => self.move_to(v.x, v.y),
                PathCommand::LineTo => self.line_to(v.x, v.y),
                PathCommand::Close  => self.close(),
            }
        }
    }
    /// Draw the outline with alpha `alpha`
    ///
    /// Returns false if the outline needs more cells than the arena
    /// holds; draw a smaller area and try again. If even a single
    /// scanline does not fit, nothing is drawn and true is returned as a
    /// smaller height would not help.
    pub fn render(&mut self, alpha: u8) -> bool {
        if ! self.enough_memory {
            return true;
        }
        if self.rasterizer.was_outline_too_complex() {
            self.record_usage();
            return false;
        }
        if ! self.pen_has_been_down {
            return true;
        }
        let alpha = div255(u32::from(self.widget_alpha) * u32::from(alpha));
        if alpha == 0 {
            return true;
        }
        self.close();

        self.painter.set_offset(self.offset_x, self.offset_y);
        self.painter.set_widget_alpha(alpha);
        let buf = self.lock.rendering_buffer(&self.area);
        let mut renderer = Renderer::new(buf, &mut *self.painter);
        let ok = self.rasterizer.render(&mut renderer);
        self.record_usage();
        ok
    }
    fn record_usage(&mut self) {
        self.usage.record(self.rasterizer.num_cells(), self.rasterizer.cells_missing(), self.scanline_width);
    }
}
