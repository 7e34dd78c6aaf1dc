//! Rasterizer

use crate::POLY_BASE_SHIFT;
use crate::AA_SHIFT;
use crate::AA_NUM;
use crate::AA_MASK;
use crate::AA_2NUM;
use crate::AA_2MASK;

use crate::arena::Arena;
use crate::cell::Outline;
use crate::scan::Scanline;
use crate::Render;

use log::{debug, trace};

/// Mapping of accumulated winding to coverage
#[derive(Debug,PartialEq,Eq,Copy,Clone)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

/// Convert an area into a coverage value in `[0,255]`
///
///     use cwr::{calculate_alpha, FillingRule};
///
///     assert_eq!(calculate_alpha(FillingRule::NonZero, 64 << 6), 255);
///     assert_eq!(calculate_alpha(FillingRule::EvenOdd, 64 << 6), 0);
///     assert_eq!(calculate_alpha(FillingRule::NonZero, -(16 << 6)), 128);
///     assert_eq!(calculate_alpha(FillingRule::NonZero, i32::MIN), 255);
pub fn calculate_alpha(rule: FillingRule, area: i32) -> u8 {
    // Shift is at least one, abs() cannot overflow
    let mut cover = (area >> (POLY_BASE_SHIFT * 2 + 1 - AA_SHIFT)).abs();
    if rule == FillingRule::EvenOdd {
        cover &= AA_2MASK;
        if cover > AA_NUM {
            cover = AA_2NUM - cover;
        }
    }
    if cover > AA_MASK {
        cover = AA_MASK;
    }
    cover as u8
}

/// Anti-aliased polygon rasterizer
///
/// Converts an outline into coverage values one scanline at a time and
/// hands every completed Scanline to a [Render]
///
/// [Render]: ../trait.Render.html
#[derive(Debug)]
pub struct Rasterizer<'a> {
    outline: Outline<'a>,
    scanline: Scanline<'a>,
    filling_rule: FillingRule,
}

impl<'a> Rasterizer<'a> {
    /// Create a new Rasterizer using the cells and scanline of an Arena
    pub fn new(arena: &'a mut Arena) -> Self {
        let (outline, scanline, _) = arena.parts();
        Self::from_parts(outline, scanline)
    }
    pub fn from_parts(outline: Outline<'a>, scanline: Scanline<'a>) -> Self {
        Self { outline, scanline, filling_rule: FillingRule::default() }
    }
    /// Reset Rasterizer
    ///
    /// Removes all cells and spans, the filling rule is kept
    pub fn reset(&mut self) {
        self.outline.reset();
        self.scanline.reset();
    }
    pub fn set_filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }
    pub fn filling_rule(&self) -> FillingRule {
        self.filling_rule
    }
    /// Move to position (x,y) in Q5 coordinates
    pub fn move_to(&mut self, x: i32, y: i32) {
        if ! self.outline.was_outline_too_complex() {
            self.outline.move_to(x, y);
        }
    }
    /// Draw line to position (x,y) in Q5 coordinates
    pub fn line_to(&mut self, x: i32, y: i32) {
        if ! self.outline.was_outline_too_complex() {
            self.outline.line_to(x, y);
        }
    }
    /// Coverage of an area using the current filling rule
    pub fn calculate_alpha(&self, area: i32) -> u8 {
        calculate_alpha(self.filling_rule, area)
    }
    pub fn set_max_render_y(&mut self, y: i32) {
        self.outline.set_max_render_y(y);
    }
    pub fn was_outline_too_complex(&self) -> bool {
        self.outline.was_outline_too_complex()
    }
    pub fn num_cells(&self) -> usize {
        self.outline.num_cells()
    }
    pub fn max_cells(&self) -> usize {
        self.outline.max_cells()
    }
    pub fn cells_missing(&self) -> usize {
        self.outline.cells_missing()
    }
    pub fn scanline(&self) -> &Scanline<'a> {
        &self.scanline
    }
    /// Render the outline
    ///
    /// Returns false if the outline did not fit in the available cells,
    /// nothing is rendered in that case. An empty outline renders
    /// nothing and returns true.
    pub fn render<R: Render>(&mut self, ren: &mut R) -> bool {
        let rule = self.filling_rule;

        // Close and sort before checking, closing may overflow
        self.outline.cells();
        if self.outline.was_outline_too_complex() {
            debug!("RENDER: outline too complex, {} cells missing", self.outline.cells_missing());
            return false;
        }
        let cells = self.outline.cells();
        if cells.is_empty() {
            return true;
        }
        let sl = &mut self.scanline;
        sl.reset_spans();

        let mut cover = 0;
        let mut y = cells[0].y;
        let mut i = 0;
        while i < cells.len() {
            let start = cells[i];
            if start.y != y {
                cover = 0;
                y = start.y;
            }
            let mut x = start.x;
            let mut area = start.area;
            cover += start.cover;
            i += 1;
            // Accumulate all cells with the same coordinates
            while i < cells.len() && cells[i].x == start.x && cells[i].y == y {
                area += cells[i].area;
                cover += cells[i].cover;
                i += 1;
            }
            if area != 0 {
                let alpha = calculate_alpha(rule, (cover << (POLY_BASE_SHIFT + 1)) - area);
                if alpha != 0 {
                    if sl.is_ready(y) {
                        ren.render(sl);
                        sl.reset_spans();
                    }
                    sl.add_cell(x, y, alpha);
                }
                x += 1;
            }
            // Gap to the next cell on this line
            if let Some(next) = cells.get(i) {
                if next.y == y && next.x > x {
                    let alpha = calculate_alpha(rule, cover << (POLY_BASE_SHIFT + 1));
                    if alpha != 0 {
                        if sl.is_ready(y) {
                            ren.render(sl);
                            sl.reset_spans();
                        }
                        trace!("RENDER: span {} {} len {} alpha {}", x, y, next.x - x, alpha);
                        sl.add_span(x, y, next.x - x, alpha);
                    }
                }
            }
        }
        if sl.num_spans() > 0 {
            ren.render(sl);
            sl.reset_spans();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_clamped() {
        let areas = [i32::MIN, i32::MIN + 1, -1 << 20, -4096, -1, 0, 1, 255 << 3, 4096, 1 << 20, i32::MAX];
        for &rule in [FillingRule::NonZero, FillingRule::EvenOdd].iter() {
            for &a in areas.iter() {
                let _ = calculate_alpha(rule, a);
            }
        }
        assert_eq!(calculate_alpha(FillingRule::NonZero, 255 << 3), 255);
        assert_eq!(calculate_alpha(FillingRule::NonZero, 256 << 3), 255);
        assert_eq!(calculate_alpha(FillingRule::EvenOdd, 256 << 3), 255);
        assert_eq!(calculate_alpha(FillingRule::EvenOdd, 257 << 3), 255);
        assert_eq!(calculate_alpha(FillingRule::EvenOdd, 384 << 3), 128);
        assert_eq!(calculate_alpha(FillingRule::EvenOdd, 512 << 3), 0);
    }
}
