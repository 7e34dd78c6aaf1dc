//! Path Storage

use crate::fixed::Q5;
use crate::VertexSource;

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    /// Return to the start of the contour
    Close,
}
impl Default for PathCommand {
    fn default() -> PathCommand {
        PathCommand::MoveTo
    }
}

/// Point of a path in Q5 coordinates
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Vertex {
    pub x: Q5,
    pub y: Q5,
    pub cmd: PathCommand
}

impl Vertex {
    pub fn new(x: Q5, y: Q5, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    pub fn move_to(x: Q5, y: Q5) -> Self {
        Self { x, y, cmd: PathCommand::MoveTo }
    }
    pub fn line_to(x: Q5, y: Q5) -> Self {
        Self { x, y, cmd: PathCommand::LineTo }
    }
    pub fn close_polygon(x: Q5, y: Q5) -> Self {
        Self { x, y, cmd: PathCommand::Close }
    }
}

/// Sequence of contours
///
///     use cwr::Path;
///
///     let mut path = Path::new();
///     path.move_to(0, 0);
///     path.line_to(10, 0);
///     path.line_to(10, 10);
///     path.close_polygon();
///     assert_eq!(path.len(), 4);
///     path.close_polygon();
///     assert_eq!(path.len(), 4);
#[derive(Debug,Default,Clone)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl VertexSource for Path {
    fn vertices(&self) -> Vec<Vertex> {
        self.vertices.clone()
    }
}

impl Path {
    pub fn new() -> Self {
        Self { vertices: vec![] }
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn move_to<T: Into<Q5>>(&mut self, x: T, y: T) {
        self.vertices.push( Vertex::move_to(x.into(), y.into()) );
    }
    pub fn line_to<T: Into<Q5>>(&mut self, x: T, y: T) {
        self.vertices.push( Vertex::line_to(x.into(), y.into()) );
    }
    /// Close the current contour
    ///
    /// Does nothing if the last vertex is not a LineTo
    pub fn close_polygon(&mut self) {
        if let Some(last) = self.vertices.last().copied() {
            if last.cmd == PathCommand::LineTo {
                self.vertices.push( Vertex::close_polygon(last.x, last.y) );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_needs_a_line() {
        let mut path = Path::new();
        path.close_polygon();
        assert!(path.is_empty());
        path.move_to(0, 0);
        path.close_polygon();
        assert_eq!(path.len(), 1);
        path.line_to(0, 10);
        path.line_to(10.5f32, 10.0);
        path.close_polygon();
        let v = path.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(v[2], Vertex::line_to(Q5::from(10.5f32), Q5::from(10)));
        assert_eq!(v[3], Vertex::close_polygon(Q5::from(10.5f32), Q5::from(10)));
    }
}
