#![allow(dead_code)]

use cwr::{Arena, Q5, Rasterizer, Render, Scanline};

/// Send log output to the test harness
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Raw Q5 value of a coordinate
pub fn q5(v: f64) -> i32 {
    Q5::from(v).bits()
}

/// Arena partitioned for `width` pixels and `cells` cells
pub fn arena(width: usize, cells: usize) -> Arena {
    let mut arena = Arena::new(Arena::bytes_required(width, cells));
    assert!(arena.set_scanline_width(width));
    arena
}

/// Rasterizer over `arena` drawing rows `[0, height)`
pub fn rasterizer(arena: &mut Arena, height: i32) -> Rasterizer<'_> {
    let mut ras = Rasterizer::new(arena);
    ras.set_max_render_y(height);
    ras
}

/// Draw a closed polygon
pub fn polygon(ras: &mut Rasterizer<'_>, pts: &[(f64, f64)]) {
    if let Some(&(x, y)) = pts.first() {
        ras.move_to(q5(x), q5(y));
    }
    for &(x, y) in &pts[1 ..] {
        ras.line_to(q5(x), q5(y));
    }
}

/// Collects every span handed over by the Rasterizer
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Recorder {
    /// (y, x, covers)
    pub spans: Vec<(i32, i32, Vec<u8>)>,
    pub lines: usize,
}

impl Render for Recorder {
    fn render(&mut self, sl: &Scanline<'_>) {
        self.lines += 1;
        for span in sl.spans() {
            self.spans.push((sl.y(), span.x, span.covers.to_vec()));
        }
    }
}

impl Recorder {
    /// Spans on row `y` as (x, covers)
    pub fn row(&self, y: i32) -> Vec<(i32, Vec<u8>)> {
        self.spans.iter()
            .filter(|s| s.0 == y)
            .map(|s| (s.1, s.2.clone()))
            .collect()
    }
    pub fn alpha(&self, x: i32, y: i32) -> u8 {
        for (sy, sx, covers) in &self.spans {
            if *sy == y && x >= *sx && x < sx + covers.len() as i32 {
                return covers[(x - sx) as usize];
            }
        }
        0
    }
    /// Covered area of row `y` in pixels
    pub fn coverage(&self, y: i32) -> f64 {
        self.spans.iter()
            .filter(|s| s.0 == y)
            .flat_map(|s| s.2.iter())
            .map(|&c| f64::from(c) / 255.0)
            .sum()
    }
}
