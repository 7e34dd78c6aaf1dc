//! Rectangles and Outside Regions

use crate::fixed::Q5;

/// Integer rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new Rectangle, negative sizes become empty
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width: width.max(0), height: height.max(0) }
    }
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
    /// Point is inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
    /// Overlapping part of two rectangles
    ///
    ///     use cwr::Rect;
    ///     let a = Rect::new(0, 0, 10, 10);
    ///     let b = Rect::new(5, -5, 10, 10);
    ///     assert_eq!(a.intersect(&b), Rect::new(5, 0, 5, 5));
    ///     assert!(a.intersect(&Rect::new(20, 20, 1, 1)).is_empty());
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r <= x || b <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, r - x, b - y)
    }
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
    /// Transform from display to frame buffer coordinates when the
    /// display is rotated 90 degrees
    ///
    /// `width` is the width of the surrounding area, either the display
    /// or the widget the rectangle is relative to
    ///
    ///     use cwr::Rect;
    ///     let r = Rect::new(2, 3, 4, 5);
    ///     assert_eq!(r.rotate90(20), Rect::new(3, 14, 5, 4));
    pub fn rotate90(&self, width: i32) -> Rect {
        Rect::new(self.y, width - self.x - self.width, self.height, self.width)
    }
    /// Split into horizontal bands no taller than `max_height`
    ///
    /// Used to draw an area again in smaller pieces when an outline does
    /// not fit in the available cells
    pub fn split_horizontal(&self, max_height: i32) -> Vec<Rect> {
        let max_height = max_height.max(1);
        let mut out = vec![];
        let mut y = self.y;
        while y < self.bottom() {
            let h = max_height.min(self.bottom() - y);
            out.push(Rect::new(self.x, y, self.width, h));
            y += h;
        }
        out
    }
}

/// Inside the Region
pub const INSIDE : u8 = 0;
/// Above the Region
pub const ABOVE  : u8 = 0b0000_0001;
/// Below the Region
pub const BELOW  : u8 = 0b0000_0010;
/// Left of the Region
pub const LEFT   : u8 = 0b0000_0100;
/// Right of the Region
pub const RIGHT  : u8 = 0b0000_1000;

/// Location of a point relative to the region `[0,width) x [0,height)`
///
/// Returned is a combination of [ABOVE], [BELOW], [LEFT] and [RIGHT],
/// or [INSIDE]
///
/// [INSIDE]: constant.INSIDE.html
/// [ABOVE]: constant.ABOVE.html
/// [BELOW]: constant.BELOW.html
/// [LEFT]: constant.LEFT.html
/// [RIGHT]: constant.RIGHT.html
pub fn outside_flags(x: Q5, y: Q5, width: Q5, height: Q5) -> u8 {
    let mut code = INSIDE;
    if y < Q5::from(0) {
        code = ABOVE;
    } else if y >= height {
        code = BELOW;
    }
    if x < Q5::from(0) {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        let (w, h) = (Q5::from(10), Q5::from(10));
        assert_eq!(outside_flags(Q5::from(5), Q5::from(5), w, h), INSIDE);
        assert_eq!(outside_flags(Q5::from(-1), Q5::from(5), w, h), LEFT);
        assert_eq!(outside_flags(Q5::from(10), Q5::from(-1), w, h), RIGHT | ABOVE);
        assert_eq!(outside_flags(Q5::from(5), Q5::from(10), w, h), BELOW);
    }

    #[test]
    fn split_covers_rect() {
        let r = Rect::new(3, 4, 10, 25);
        let parts = r.split_horizontal(10);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2], Rect::new(3, 24, 10, 5));
        assert_eq!(parts.iter().map(|p| p.height).sum::<i32>(), 25);
    }
}
