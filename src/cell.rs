//! Cells and the outline accumulator

use crate::POLY_BASE_SHIFT;
use crate::POLY_BASE_SIZE;
use crate::POLY_BASE_MASK;

use log::{debug, trace, warn};

use std::cmp::min;
use std::cmp::max;

/// Coverage contribution of polygon edges to a single pixel
///
/// See <http://projects.tuxee.net/cl-vectors/section-the-cl-aa-algorithm>
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub cover: i32,
    pub area: i32,
}

impl Cell {
    /// Empty cell at an impossible position
    pub fn new() -> Self {
        Cell { x: i32::MAX, y: i32::MAX, cover: 0, area: 0 }
    }
    pub fn at(x: i32, y: i32) -> Self {
        Cell { x, y, cover: 0, area: 0 }
    }
    pub fn equal(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
    pub fn add_cover(&mut self, cover: i32, area: i32) {
        self.cover += cover;
        self.area += area;
    }
}

/// Current contour must be closed before the cells are used
const OUTLINE_NOT_CLOSED    : u32 = 1;
/// Cells were added since the last sort
const OUTLINE_SORT_REQUIRED : u32 = 2;

/// Longest horizontal extent of a single edge, longer edges are split
const DX_LIMIT : i32 = 16384 << POLY_BASE_SHIFT;

/// Polygon outline stored as cells in a caller supplied slice
///
/// Coordinates are Q5 values. Cells outside `[0, max_render_y)` are never
/// stored. When the slice is full the outline is marked as too complex
/// and further cells are dropped (only counted).
#[derive(Debug)]
pub struct Outline<'a> {
    cells: &'a mut [Cell],
    num_cells: usize,
    cur_cell: Cell,
    cur_x: i32,
    cur_y: i32,
    close_x: i32,
    close_y: i32,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    flags: u32,
    max_render_y: i32,
    too_complex: bool,
    cells_missing: usize,
}

impl<'a> Outline<'a> {
    pub fn new(cells: &'a mut [Cell]) -> Self {
        let mut outline = Outline {
            cells,
            num_cells: 0,
            cur_cell: Cell::new(),
            cur_x: 0, cur_y: 0,
            close_x: 0, close_y: 0,
            min_x: i32::MAX, min_y: i32::MAX,
            max_x: i32::MIN, max_y: i32::MIN,
            flags: OUTLINE_SORT_REQUIRED,
            max_render_y: i32::MAX,
            too_complex: false,
            cells_missing: 0,
        };
        outline.reset();
        outline
    }
    /// Remove all cells, capacity is unchanged
    pub fn reset(&mut self) {
        self.num_cells = 0;
        self.cur_cell = Cell::new();
        self.cur_x = 0;
        self.cur_y = 0;
        self.close_x = 0;
        self.close_y = 0;
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.flags = OUTLINE_SORT_REQUIRED;
        self.too_complex = false;
        self.cells_missing = 0;
    }
    /// Start a new contour, closing the previous one
    pub fn move_to(&mut self, x: i32, y: i32) {
        if self.flags & OUTLINE_SORT_REQUIRED == 0 {
            self.reset();
        }
        if self.flags & OUTLINE_NOT_CLOSED != 0 {
            self.line_to(self.close_x, self.close_y);
            self.flags &= !OUTLINE_NOT_CLOSED;
        }
        self.set_cur_cell(x >> POLY_BASE_SHIFT, y >> POLY_BASE_SHIFT);
        self.close_x = x;
        self.close_y = y;
        self.cur_x = x;
        self.cur_y = y;
    }
    /// Add an edge from the current position to (x,y)
    pub fn line_to(&mut self, x: i32, y: i32) {
        if self.flags & OUTLINE_SORT_REQUIRED != 0 && (self.cur_x != x || self.cur_y != y) {
            self.render_line(self.cur_x, self.cur_y, x, y);
            self.cur_x = x;
            self.cur_y = y;
            self.flags |= OUTLINE_NOT_CLOSED;
        }
    }
    /// Stored cells sorted by y, then x
    ///
    /// The open contour is closed and the cells sorted on the first call,
    /// later calls return the same cells.
    pub fn cells(&mut self) -> &[Cell] {
        self.finish();
        &self.cells[.. self.num_cells]
    }
    fn finish(&mut self) {
        if self.flags & OUTLINE_NOT_CLOSED != 0 {
            self.line_to(self.close_x, self.close_y);
            self.flags &= !OUTLINE_NOT_CLOSED;
        }
        if self.flags & OUTLINE_SORT_REQUIRED != 0 {
            self.add_cur_cell();
            self.cur_cell = Cell::new();
            self.sort_cells();
            self.flags &= !OUTLINE_SORT_REQUIRED;
        }
    }
    fn sort_cells(&mut self) {
        debug!("SORT_CELLS: N: {} Y: {} .. {}", self.num_cells, self.min_y, self.max_y);
        self.cells[.. self.num_cells].sort_unstable_by_key(|c| (c.y, c.x));
    }
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }
    /// Number of cells available in the backing slice
    pub fn max_cells(&self) -> usize {
        self.cells.len()
    }
    /// Number of cells that did not fit since the last reset
    pub fn cells_missing(&self) -> usize {
        self.cells_missing
    }
    pub fn set_max_render_y(&mut self, y: i32) {
        self.max_render_y = y;
    }
    pub fn max_render_y(&self) -> i32 {
        self.max_render_y
    }
    /// True once a cell did not fit in the backing slice
    pub fn was_outline_too_complex(&self) -> bool {
        self.too_complex
    }
    /// Bounding box of the stored cells as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(i32,i32,i32,i32)> {
        if self.num_cells == 0 {
            None
        } else {
            Some((self.min_x, self.min_y, self.max_x, self.max_y))
        }
    }

    fn set_cur_cell(&mut self, x: i32, y: i32) {
        if ! self.cur_cell.equal(x, y) {
            self.add_cur_cell();
            self.cur_cell = Cell::at(x, y);
        }
    }
    fn add_cur_cell(&mut self) {
        let c = self.cur_cell;
        if c.is_empty() {
            return;
        }
        if c.y < 0 || c.y >= self.max_render_y {
            return;
        }
        if self.num_cells >= self.cells.len() {
            if ! self.too_complex {
                warn!("Outline too complex: {} cells available", self.cells.len());
            }
            self.too_complex = true;
            self.cells_missing += 1;
            return;
        }
        self.cells[self.num_cells] = c;
        self.num_cells += 1;
        self.min_x = min(self.min_x, c.x);
        self.min_y = min(self.min_y, c.y);
        self.max_x = max(self.max_x, c.x);
        self.max_y = max(self.max_y, c.y);
    }

    /// Edge contribution within scanline `ey`
    ///
    /// `y1` and `y2` are the fractional parts of the edge end points
    fn render_scanline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let ex1 = x1 >> POLY_BASE_SHIFT;
        let ex2 = x2 >> POLY_BASE_SHIFT;
        let fx1 = x1 & POLY_BASE_MASK;
        let fx2 = x2 & POLY_BASE_MASK;

        // Horizontal Line
        if y1 == y2 {
            self.set_cur_cell(ex2, ey);
            return;
        }
        // Single Cell
        if ex1 == ex2 {
            let delta = y2 - y1;
            self.cur_cell.add_cover(delta, (fx1 + fx2) * delta);
            return;
        }
        // Adjacent Cells on Same Line
        let (mut p, first, incr, dx) = if x2 - x1 < 0 {
            (fx1 * (y2 - y1), 0, -1, x1 - x2)
        } else {
            ((POLY_BASE_SIZE - fx1) * (y2 - y1), POLY_BASE_SIZE, 1, x2 - x1)
        };
        let mut delta = p / dx;
        let mut xmod = p % dx;
        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.cur_cell.add_cover(delta, (fx1 + first) * delta);

        let mut ex1 = ex1 + incr;
        self.set_cur_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = POLY_BASE_SIZE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;
            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.cur_cell.add_cover(delta, POLY_BASE_SIZE * delta);
                y1 += delta;
                ex1 += incr;
                self.set_cur_cell(ex1, ey);
            }
        }
        delta = y2 - y1;
        self.cur_cell.add_cover(delta, (fx2 + POLY_BASE_SIZE - first) * delta);
    }

    fn render_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 - x1;
        // Split long lines in half
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = (x1 + x2) >> 1;
            let cy = (y1 + y2) >> 1;
            self.render_line(x1, y1, cx, cy);
            self.render_line(cx, cy, x2, y2);
            return;
        }
        let dy = y2 - y1;
        let ex1 = x1 >> POLY_BASE_SHIFT;
        let ex2 = x2 >> POLY_BASE_SHIFT;
        let ey1 = y1 >> POLY_BASE_SHIFT;
        let ey2 = y2 >> POLY_BASE_SHIFT;
        let fy1 = y1 & POLY_BASE_MASK;
        let fy2 = y2 & POLY_BASE_MASK;

        // Entirely above or below the render area
        if (ey1 < 0 && ey2 < 0) || (ey1 >= self.max_render_y && ey2 >= self.max_render_y) {
            trace!("LINE: skipped {} {} -> {} {}", x1, y1, x2, y2);
            self.set_cur_cell(ex2, ey2);
            return;
        }
        self.set_cur_cell(ex1, ey1);

        // Everything on a single scanline
        if ey1 == ey2 {
            self.render_scanline(ey1, x1, fy1, x2, fy2);
            return;
        }

        // Vertical line, one cell per scanline
        if dx == 0 {
            let two_fx = (x1 - (ex1 << POLY_BASE_SHIFT)) << 1;
            let (first, incr) = if dy < 0 {
                (0, -1)
            } else {
                (POLY_BASE_SIZE, 1)
            };
            let delta = first - fy1;
            self.cur_cell.add_cover(delta, two_fx * delta);

            let mut ey1 = ey1 + incr;
            self.set_cur_cell(ex1, ey1);
            let delta = first + first - POLY_BASE_SIZE;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.cur_cell.cover = delta;
                self.cur_cell.area = area;
                ey1 += incr;
                self.set_cur_cell(ex1, ey1);
            }
            let delta = fy2 - POLY_BASE_SIZE + first;
            self.cur_cell.add_cover(delta, two_fx * delta);
            return;
        }

        // Several scanlines
        let (p, first, incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_BASE_SIZE - fy1) * dx, POLY_BASE_SIZE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_scanline(ey1, x1, fy1, x_from, first);

        let mut ey1 = ey1 + incr;
        self.set_cur_cell(x_from >> POLY_BASE_SHIFT, ey1);

        if ey1 != ey2 {
            let p = POLY_BASE_SIZE * dx;
            let mut lift = p / dy;
            let mut rem = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey1 != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_scanline(ey1, x_from, POLY_BASE_SIZE - first, x_to, first);
                x_from = x_to;
                ey1 += incr;
                self.set_cur_cell(x_from >> POLY_BASE_SHIFT, ey1);
            }
        }
        self.render_scanline(ey1, x_from, POLY_BASE_SIZE - first, x2, fy2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q5(v: i32) -> i32 {
        v << POLY_BASE_SHIFT
    }

    #[test]
    fn square_cells_sum_to_zero_cover_per_line() {
        let mut buf = vec![Cell::default(); 64];
        let mut outline = Outline::new(&mut buf);
        outline.move_to(q5(1), q5(1));
        outline.line_to(q5(4), q5(1));
        outline.line_to(q5(4), q5(4));
        outline.line_to(q5(1), q5(4));
        let cells = outline.cells().to_vec();
        assert!(! cells.is_empty());
        for y in 1 .. 4 {
            let row : Vec<_> = cells.iter().filter(|c| c.y == y).collect();
            assert_eq!(row.len(), 2);
            assert_eq!(row.iter().map(|c| c.cover).sum::<i32>(), 0);
            assert_eq!(row[0].x, 1);
            assert_eq!(row[1].x, 4);
        }
        for w in cells.windows(2) {
            assert!((w[0].y, w[0].x) <= (w[1].y, w[1].x));
        }
    }

    #[test]
    fn cells_outside_render_area_are_dropped() {
        let mut buf = vec![Cell::default(); 64];
        let mut outline = Outline::new(&mut buf);
        outline.set_max_render_y(2);
        outline.move_to(q5(0), q5(-3));
        outline.line_to(q5(2), q5(-3));
        outline.line_to(q5(2), q5(6));
        outline.line_to(q5(0), q5(6));
        let cells = outline.cells();
        assert!(cells.iter().all(|c| c.y >= 0 && c.y < 2));
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn overflow_marks_too_complex() {
        let mut buf = vec![Cell::default(); 2];
        let mut outline = Outline::new(&mut buf);
        outline.move_to(q5(0), q5(0));
        outline.line_to(q5(5), q5(0));
        outline.line_to(q5(5), q5(5));
        outline.line_to(q5(0), q5(5));
        let n = outline.cells().len();
        assert_eq!(n, 2);
        assert!(outline.was_outline_too_complex());
        assert!(outline.cells_missing() > 0);
        outline.reset();
        assert!(! outline.was_outline_too_complex());
        assert_eq!(outline.num_cells(), 0);
    }

    #[test]
    fn cells_are_sorted_once() {
        let mut buf = vec![Cell::default(); 64];
        let mut outline = Outline::new(&mut buf);
        outline.move_to(q5(3), q5(0));
        outline.line_to(q5(6), q5(3));
        outline.line_to(q5(0), q5(3));
        let first = outline.cells().to_vec();
        // Ignored, the outline is already sorted
        outline.line_to(q5(10), q5(10));
        let second = outline.cells().to_vec();
        assert_eq!(first, second);
    }
}
