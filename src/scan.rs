//! Scanline coverage buffer

/// No previous pixel
const LAST_X : i32 = 0x7FFF;
/// No previous line
const LAST_Y : i32 = 0x7FFF;

/// Contiguous run of pixels on a Scanline
#[derive(Debug,PartialEq,Eq)]
pub struct Span<'s> {
    /// Absolute start of the run
    pub x: i32,
    /// Coverage for each pixel in the run
    pub covers: &'s [u8],
}

impl Span<'_> {
    pub fn len(&self) -> usize {
        self.covers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.covers.is_empty()
    }
}

/// Coverage of a single row, stored as runs
///
/// Covers are indexed by absolute x, start indices and counts by span.
/// All three slices are borrowed from the [Arena].
///
/// [Arena]: ../arena/struct.Arena.html
#[derive(Debug)]
pub struct Scanline<'a> {
    covers: &'a mut [u8],
    start_indices: &'a mut [u16],
    counts: &'a mut [u16],
    width: i32,
    last_x: i32,
    last_y: i32,
    num_spans: usize,
}

impl<'a> Scanline<'a> {
    /// Create a Scanline for pixels in `[0, width)`
    ///
    /// `covers` must hold `width` values, `start_indices` and `counts`
    /// must hold one value per possible span.
    pub fn new(covers: &'a mut [u8], start_indices: &'a mut [u16], counts: &'a mut [u16], width: usize) -> Self {
        let width = width.min(covers.len()) as i32;
        Self { covers, start_indices, counts, width,
               last_x: LAST_X, last_y: LAST_Y, num_spans: 0 }
    }
    pub fn reset(&mut self) {
        self.reset_spans();
    }
    /// Remove all spans
    pub fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.last_y = LAST_Y;
        self.num_spans = 0;
    }
    /// Add a single pixel with coverage
    ///
    /// Pixels outside `[0, width)` are dropped
    pub fn add_cell(&mut self, x: i32, y: i32, cover: u8) {
        if x < 0 || x >= self.width {
            return;
        }
        self.covers[x as usize] = cover;
        if self.num_spans > 0 && x == self.last_x + 1 {
            self.counts[self.num_spans - 1] += 1;
        } else {
            self.push_span(x, 1);
        }
        self.last_x = x;
        self.last_y = y;
    }
    /// Add `len` pixels with the same coverage starting at `x`
    ///
    /// The run is clipped to `[0, width)`
    pub fn add_span(&mut self, x: i32, y: i32, len: i32, cover: u8) {
        let (mut x, mut len) = (x, len);
        if x < 0 {
            len += x;
            x = 0;
        }
        if x + len > self.width {
            len = self.width - x;
        }
        if len <= 0 {
            return;
        }
        let (start, end) = (x as usize, (x + len) as usize);
        for c in &mut self.covers[start .. end] {
            *c = cover;
        }
        if self.num_spans > 0 && x == self.last_x + 1 {
            self.counts[self.num_spans - 1] += len as u16;
        } else {
            self.push_span(x, len);
        }
        self.last_x = x + len - 1;
        self.last_y = y;
    }
    fn push_span(&mut self, x: i32, len: i32) {
        let i = self.num_spans;
        self.start_indices[i] = x as u16;
        self.counts[i] = len as u16;
        self.num_spans += 1;
    }
    /// Spans are pending and belong to a line other than `y`
    pub fn is_ready(&self, y: i32) -> bool {
        self.num_spans != 0 && (y ^ self.last_y) != 0
    }
    /// Row of the pending spans
    pub fn y(&self) -> i32 {
        self.last_y
    }
    pub fn num_spans(&self) -> usize {
        self.num_spans
    }
    pub fn width(&self) -> i32 {
        self.width
    }
    /// Pending spans in increasing x
    pub fn spans(&self) -> impl Iterator<Item = Span<'_>> + '_ {
        let covers = &*self.covers;
        self.start_indices[.. self.num_spans].iter()
            .zip(self.counts[.. self.num_spans].iter())
            .map(move |(&start, &count)| {
                let start = usize::from(start);
                Span { x: start as i32, covers: &covers[start .. start + usize::from(count)] }
            })
    }
}
