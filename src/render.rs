//! Renderer

use crate::buffer::RenderingBuffer;
use crate::painter::Painter;
use crate::scan::Scanline;
use crate::Render;

use log::trace;

/// Hands the spans of a Scanline to a Painter
///
/// Lines outside the rendering buffer are skipped and spans are clipped
/// to its width
#[derive(Debug)]
pub struct Renderer<'r, P: Painter + ?Sized> {
    buf: RenderingBuffer<'r>,
    painter: &'r mut P,
}

impl<'r, P: Painter + ?Sized> Renderer<'r, P> {
    pub fn new(buf: RenderingBuffer<'r>, painter: &'r mut P) -> Self {
        Self { buf, painter }
    }
    pub fn buffer(&self) -> &RenderingBuffer<'r> {
        &self.buf
    }
}

impl<P: Painter + ?Sized> Render for Renderer<'_, P> {
    fn render(&mut self, sl: &Scanline<'_>) {
        let y = sl.y();
        if y < 0 || y as usize >= self.buf.height() {
            return;
        }
        let width = self.buf.width() as i32;
        let x_adjust = self.buf.x_adjust();
        let row = self.buf.row_mut(y as usize);
        for span in sl.spans() {
            let mut x = span.x;
            let mut covers = span.covers;
            if x < 0 {
                let skip = (-x) as usize;
                if skip >= covers.len() {
                    continue;
                }
                covers = &covers[skip ..];
                x = 0;
            }
            if x >= width {
                continue;
            }
            let n = covers.len().min((width - x) as usize);
            trace!("RENDER SPAN: x,y,len {} {} {}", x, y, n);
            self.painter.render(row, x, x_adjust, y, &covers[.. n]);
        }
    }
}
