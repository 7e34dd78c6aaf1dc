//! Shapes
//!
//! Shapes produce outlines in Q5 widget coordinates and are drawn with
//! [Canvas::add_path].
//!
//! Angles follow a clock: 0 degrees is up, 90 degrees is right.
//!
//! [Canvas::add_path]: ../canvas/struct.Canvas.html#method.add_path

use crate::clip::Rect;
use crate::fixed::{angle, cosine, cosine_q5, muldiv_q5, sine, sine_q5, sqrt_q10, Q5};
use crate::path_storage::Path;
use crate::path_storage::Vertex;
use crate::VertexSource;

/// Round `v` up to a multiple of `m`
fn round_up(v: i32, m: i32) -> i32 {
    (v + m - 1).div_euclid(m) * m
}

/// Circle, pie or arc
///
/// With a line width of zero the circle is filled; an arc of less than
/// 360 degrees is then closed through the center. With a line width
/// the outline is a ring, partial rings get round caps.
///
///     use cwr::{Circle, Rect};
///
///     let c = Circle::new().center(20, 20).radius(10);
///     assert_eq!(c.minimal_rect(), Rect::new(9, 9, 22, 22));
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Circle {
    center_x: Q5,
    center_y: Q5,
    radius: Q5,
    line_width: Q5,
    arc_start: Q5,
    arc_end: Q5,
    precision: i32,
    cap_precision: i32,
}

impl Default for Circle {
    fn default() -> Self {
        Self { center_x: Q5::from(0), center_y: Q5::from(0),
               radius: Q5::from(0), line_width: Q5::from(0),
               arc_start: Q5::from(0), arc_end: Q5::from(360),
               precision: 5, cap_precision: 180 }
    }
}

impl Circle {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn center<T: Into<Q5>>(mut self, x: T, y: T) -> Self {
        self.center_x = x.into();
        self.center_y = y.into();
        self
    }
    pub fn radius<T: Into<Q5>>(mut self, r: T) -> Self {
        self.radius = r.into();
        self
    }
    /// Width of the ring, zero for a filled circle
    pub fn line_width<T: Into<Q5>>(mut self, w: T) -> Self {
        self.line_width = w.into();
        self
    }
    /// Start and end angle in degrees
    pub fn arc<T: Into<Q5>>(mut self, start: T, end: T) -> Self {
        self.arc_start = start.into();
        self.arc_end = end.into();
        self
    }
    /// Degrees between points on the circle, 1 to 120
    pub fn precision(mut self, precision: i32) -> Self {
        self.precision = precision.max(1).min(120);
        self
    }
    /// Degrees between points on the caps, 1 to 180
    pub fn cap_precision(mut self, precision: i32) -> Self {
        self.cap_precision = precision.max(1).min(180);
        self
    }
    pub fn get_precision(&self) -> i32 {
        self.precision
    }
    pub fn get_cap_precision(&self) -> i32 {
        self.cap_precision
    }
    pub fn get_center(&self) -> (Q5, Q5) {
        (self.center_x, self.center_y)
    }
    pub fn get_radius(&self) -> Q5 {
        self.radius
    }
    pub fn get_line_width(&self) -> Q5 {
        self.line_width
    }
    pub fn get_arc(&self) -> (Q5, Q5) {
        (self.arc_start, self.arc_end)
    }

    /// Arc with start before end, a full turn becomes 0 to 360
    fn ordered_arc(&self) -> (Q5, Q5) {
        let (mut s, mut e) = (self.arc_start, self.arc_end);
        if s > e {
            std::mem::swap(&mut s, &mut e);
        }
        if e - s >= Q5::from(360) {
            s = Q5::from(0);
            e = Q5::from(360);
        }
        (s, e)
    }
    /// Point at `angle` on a circle of diameter `r2` around (x,y)
    fn point_ar2(x: Q5, y: Q5, a: Q5, r2: Q5) -> (Q5, Q5) {
        (x + (r2 * sine_q5(a)) / 2, y - (r2 * cosine_q5(a)) / 2)
    }
    fn at(&self, a: Q5, r2: Q5) -> (Q5, Q5) {
        Self::point_ar2(self.center_x, self.center_y, a, r2)
    }

    /// Area is inside the hole of a ring and nothing has to be drawn
    pub fn hole_contains(&self, area: &Rect) -> bool {
        if self.line_width == Q5::from(0) {
            return false;
        }
        let cx = i32::from(self.center_x);
        let cy = i32::from(self.center_y);
        let dx1 = (cx - i32::from(Q5::from(area.x))).abs();
        let dx2 = (cx - i32::from(Q5::from(area.right()))).abs();
        let dy1 = (cy - i32::from(Q5::from(area.y))).abs();
        let dy2 = (cy - i32::from(Q5::from(area.bottom()))).abs();
        let dx = Q5::raw(dx1.max(dx2)).to_int() + 1;
        let dy = Q5::raw(dy1.max(dy2)).to_int() + 1;
        let dsqr = dx * dx + dy * dy;
        // Smallest distance from the center to the inner polygon
        let rmin = ((self.radius - self.line_width / 2) * cosine((self.precision + 1) / 2)).to_int();
        dsqr < rmin * rmin
    }

    /// Smallest rectangle containing the circle
    pub fn minimal_rect(&self) -> Rect {
        self.minimal_rect_arc(self.arc_start, self.arc_end)
    }
    /// Smallest rectangle containing the circle drawn from `start` to `end` degrees
    pub fn minimal_rect_arc<T: Into<Q5>>(&self, start: T, end: T) -> Rect {
        let c = Circle { arc_start: start.into(), arc_end: end.into(), ..*self };
        let (s, e) = c.ordered_arc();
        let mut b = Bounds::new();
        let outer = self.radius * 2 + self.line_width;
        let quarter = Q5::from(90);

        b.add(self.at(s, outer));
        // Extremes are at multiples of 90 degrees
        let mut i = Q5::raw(round_up(i32::from(s + Q5::from(1)), i32::from(quarter)));
        while i <= e {
            b.add(self.at(i, outer));
            i = i + quarter;
        }
        if i - quarter < e {
            b.add(self.at(e, outer));
        }
        if self.line_width == Q5::from(0) {
            if e - s < Q5::from(360) {
                b.add((self.center_x, self.center_y));
            }
        } else {
            let inner = self.radius * 2 - self.line_width;
            b.add(self.at(s, inner));
            b.add(self.at(e, inner));
        }
        // Round caps
        if self.cap_precision < 180 && e - s < Q5::from(360) {
            let hw = self.line_width / 2;
            for &a in [s, e].iter() {
                let (x, y) = self.at(a, self.radius * 2);
                b.add((x - hw, y - hw));
                b.add((x + hw, y + hw));
            }
        }
        b.rect()
    }
}

impl VertexSource for Circle {
    fn vertices(&self) -> Vec<Vertex> {
        let (s, e) = self.ordered_arc();
        let full = Q5::from(360);
        let mut radius = self.radius;
        let mut line_width = self.line_width;
        if line_width > radius * 2 {
            line_width = radius + line_width / 2;
            radius = line_width / 2;
        }
        let step = Q5::from(self.precision);
        let outer = radius * 2 + line_width;
        let mut path = Path::new();

        let (x, y) = self.at(s, outer);
        path.move_to(x, y);
        let mut arc = s;
        let mut next = Q5::raw(round_up(i32::from(arc + Q5::from(1)), i32::from(step)));
        while next <= e {
            arc = next;
            let (x, y) = self.at(arc, outer);
            path.line_to(x, y);
            next = next + step;
        }
        if arc < e {
            let (x, y) = self.at(e, outer);
            path.line_to(x, y);
        }

        if line_width == Q5::from(0) {
            // Pie, back through the center
            if e - s < full {
                path.line_to(self.center_x, self.center_y);
            }
        } else {
            let cap_step = Q5::from(self.cap_precision);
            let half = Q5::from(180);
            let inner = radius * 2 - line_width;
            if e - s < full {
                let (cx, cy) = self.at(e, radius * 2);
                let mut a = e + cap_step;
                while a < e + half {
                    let (x, y) = Self::point_ar2(cx, cy, a, line_width);
                    path.line_to(x, y);
                    a = a + cap_step;
                }
            }
            // Inside of the ring, backwards
            if arc < e {
                let (x, y) = self.at(e, inner);
                path.line_to(x, y);
            }
            let mut next = arc;
            while next >= s {
                arc = next;
                let (x, y) = self.at(arc, inner);
                path.line_to(x, y);
                next = next - step;
            }
            if arc > s {
                let (x, y) = self.at(s, inner);
                path.line_to(x, y);
            }
            if e - s < full {
                let (cx, cy) = self.at(s, radius * 2);
                let mut a = s - half + cap_step;
                while a < s {
                    let (x, y) = Self::point_ar2(cx, cy, a, line_width);
                    path.line_to(x, y);
                    a = a + cap_step;
                }
            }
        }
        path.close_polygon();
        path.vertices()
    }
}

/// Ending of a Line
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum LineCap {
    /// Ends at the end points
    Butt,
    /// Half circle around the end points
    Round,
    /// Extends half the line width past the end points
    Square,
}
impl Default for LineCap {
    fn default() -> LineCap {
        LineCap::Butt
    }
}

/// Straight line of a given width
///
///     use cwr::{Line, LineCap, Rect};
///
///     let l = Line::new().start(2, 5).end(12, 5).width(4).cap(LineCap::Square);
///     assert_eq!(l.minimal_rect(), Rect::new(0, 3, 15, 5));
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Line {
    x1: Q5,
    y1: Q5,
    x2: Q5,
    y2: Q5,
    width: Q5,
    cap: LineCap,
    cap_precision: i32,
}

impl Default for Line {
    fn default() -> Self {
        Self { x1: Q5::from(0), y1: Q5::from(0), x2: Q5::from(0), y2: Q5::from(0),
               width: Q5::from(1), cap: LineCap::Butt, cap_precision: 18 }
    }
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn start<T: Into<Q5>>(mut self, x: T, y: T) -> Self {
        self.x1 = x.into();
        self.y1 = y.into();
        self
    }
    pub fn end<T: Into<Q5>>(mut self, x: T, y: T) -> Self {
        self.x2 = x.into();
        self.y2 = y.into();
        self
    }
    /// End point at `length` in direction `degrees` from the start
    pub fn length_and_angle<T: Into<Q5>>(mut self, length: T, degrees: T) -> Self {
        let (l, a) = (length.into(), degrees.into());
        self.x2 = self.x1 + l * sine_q5(a);
        self.y2 = self.y1 - l * cosine_q5(a);
        self
    }
    pub fn width<T: Into<Q5>>(mut self, w: T) -> Self {
        self.width = w.into();
        self
    }
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
    /// Degrees between points on round caps, 1 to 180
    pub fn cap_precision(mut self, precision: i32) -> Self {
        self.cap_precision = precision.max(1).min(180);
        self
    }
    pub fn get_start(&self) -> (Q5, Q5) {
        (self.x1, self.y1)
    }
    pub fn get_end(&self) -> (Q5, Q5) {
        (self.x2, self.y2)
    }

    /// Half the width along and across the line, as (dx, dy)
    fn half_width(&self) -> Option<(Q5, Q5)> {
        // Sum of two squares stays below i32::MAX
        const MAXVAL : i32 = 32767;
        let mut dx = i32::from(self.x2 - self.x1);
        let mut dy = i32::from(self.y2 - self.y1);
        let d = if dx == 0 && dy == 0 {
            return None;
        } else if dx == 0 {
            Q5::raw(dy.abs())
        } else if dy == 0 {
            Q5::raw(dx.abs())
        } else {
            // Scale to use most of 32 bits when squaring
            let g = gcd(dx.abs(), dy.abs());
            dx /= g;
            dy /= g;
            let mult = (MAXVAL / dx.abs()).min(MAXVAL / dy.abs());
            if mult >= 1 {
                dx *= mult;
                dy *= mult;
            } else {
                let div = (dx.abs() / MAXVAL).max(dy.abs() / MAXVAL) + 1;
                dx /= div;
                dy /= div;
            }
            sqrt_q10(Q5::raw(dy) * Q5::raw(dy) + Q5::raw(dx) * Q5::raw(dx))
        };
        let hx = muldiv_q5(self.width, Q5::raw(dx), d) / 2;
        let hy = muldiv_q5(self.width, Q5::raw(dy), d) / 2;
        Some((hx, hy))
    }
    /// Corners of the line, extended for square caps
    fn corners(&self, square: bool) -> [(Q5, Q5); 4] {
        let (x1, y1, x2, y2) = (self.x1, self.y1, self.x2, self.y2);
        let (dx, dy) = match self.half_width() {
            Some(h) => h,
            None => return [(x1, y1); 4],
        };
        if square {
            [(x1 - dy - dx, y1 + dx - dy), (x2 - dy + dx, y2 + dx + dy),
             (x2 + dy + dx, y2 - dx + dy), (x1 + dy - dx, y1 - dx - dy)]
        } else {
            [(x1 - dy, y1 + dx), (x2 - dy, y2 + dx),
             (x2 + dy, y2 - dx), (x1 + dy, y1 - dx)]
        }
    }
    /// Smallest rectangle containing the line, caps included
    pub fn minimal_rect(&self) -> Rect {
        let corners = self.corners(self.cap != LineCap::Butt);
        let mut b = Bounds::new();
        for &c in corners.iter() {
            b.add(c);
        }
        let (x0, y0, x1, y1) = (b.x_min.to_int(), b.y_min.to_int(), b.x_max.to_int(), b.y_max.to_int());
        Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }
}

impl VertexSource for Line {
    fn vertices(&self) -> Vec<Vertex> {
        let c = self.corners(self.cap == LineCap::Square);
        let mut path = Path::new();
        path.move_to(c[0].0, c[0].1);
        path.line_to(c[1].0, c[1].1);
        if self.cap == LineCap::Round {
            let (a, radius) = angle(c[0].0 - self.x1, c[0].1 - self.y1);
            let mut i = self.cap_precision;
            while i < 180 {
                path.line_to(self.x2 + radius * sine(a - i), self.y2 - radius * cosine(a - i));
                i += self.cap_precision;
            }
        }
        path.line_to(c[2].0, c[2].1);
        path.line_to(c[3].0, c[3].1);
        if self.cap == LineCap::Round {
            let (a, radius) = angle(c[0].0 - self.x1, c[0].1 - self.y1);
            let mut i = 180 - self.cap_precision;
            while i > 0 {
                path.line_to(self.x1 + radius * sine(a + i), self.y1 - radius * cosine(a + i));
                i -= self.cap_precision;
            }
        }
        path.close_polygon();
        path.vertices()
    }
}

fn gcd(a: i32, b: i32) -> i32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Bounding box of Q5 points
struct Bounds {
    x_min: Q5,
    y_min: Q5,
    x_max: Q5,
    y_max: Q5,
}

impl Bounds {
    fn new() -> Self {
        Self { x_min: Q5::raw(i32::MAX), y_min: Q5::raw(i32::MAX),
               x_max: Q5::raw(i32::MIN), y_max: Q5::raw(i32::MIN) }
    }
    fn add(&mut self, (x, y): (Q5, Q5)) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }
    fn rect(&self) -> Rect {
        let (x0, y0) = (self.x_min.to_int(), self.y_min.to_int());
        let (x1, y1) = (self.x_max.to_int(), self.y_max.to_int());
        Rect::new(x0 - 1, y0 - 1, x1 - x0 + 2, y1 - y0 + 2)
    }
}
