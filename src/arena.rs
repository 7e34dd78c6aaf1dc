//! Memory budget for cells and scanlines

use crate::cell::Cell;
use crate::cell::Outline;
use crate::scan::Scanline;

use log::{debug, info};

use std::mem::size_of;

/// Bytes used per scanline pixel: one cover, one start index and one count
pub const SCANLINE_BYTES_PER_PIXEL : usize = size_of::<u8>() + 2 * size_of::<u16>();
/// Bytes used per cell
pub const CELL_BYTES : usize = size_of::<Cell>();

/// Largest number of cells used and missing by any draw
#[derive(Debug,Default,Clone,Copy,PartialEq,Eq)]
pub struct MemoryUsage {
    max_cells_used: usize,
    max_cells_missing: usize,
    write_report: bool,
}

impl MemoryUsage {
    /// Record the outcome of a single draw
    pub fn record(&mut self, used: usize, missing: usize, scanline_width: usize) {
        self.max_cells_used = self.max_cells_used.max(used);
        self.max_cells_missing = self.max_cells_missing.max(missing);
        if self.write_report {
            let line = scanline_bytes(scanline_width);
            info!("CWR requested {} bytes, {} bytes missing",
                  line + (used + missing) * CELL_BYTES, missing * CELL_BYTES);
        }
    }
    pub fn max_cells_used(&self) -> usize {
        self.max_cells_used
    }
    pub fn max_cells_missing(&self) -> usize {
        self.max_cells_missing
    }
}

fn scanline_bytes(width: usize) -> usize {
    (width + 2) * SCANLINE_BYTES_PER_PIXEL
}

/// Fixed memory budget shared by all drawing operations
///
/// The budget is split between one scanline and as many cells as fit in
/// the remaining bytes. Storage is reserved when the Arena is created;
/// changing the scanline width never allocates. Cells and scanline are
/// kept in separate typed buffers, each large enough for its share of
/// any partition, so up to twice the budget is reserved, see
/// [reserved_bytes].
///
/// [reserved_bytes]: #method.reserved_bytes
///
///     use cwr::Arena;
///
///     let bytes = Arena::bytes_required(100, 50);
///     let mut arena = Arena::new(bytes);
///     assert!(arena.set_scanline_width(100));
///     assert_eq!(arena.max_cells(), 50);
///     assert!(arena.set_scanline_width(10));
///     assert!(arena.max_cells() > 50);
///     assert!(! arena.set_scanline_width(10_000));
///     assert!(! arena.has_buffer());
#[derive(Debug)]
pub struct Arena {
    budget: usize,
    cells: Vec<Cell>,
    covers: Vec<u8>,
    start_indices: Vec<u16>,
    counts: Vec<u16>,
    scanline_width: usize,
    max_cells: usize,
    has_buffer: bool,
    usage: MemoryUsage,
}

impl Arena {
    /// Create an Arena with a budget of `bytes`
    pub fn new(bytes: usize) -> Self {
        let max_pixels = bytes / SCANLINE_BYTES_PER_PIXEL;
        let max_cells = bytes.saturating_sub(scanline_bytes(0)) / CELL_BYTES;
        let arena = Self {
            budget: bytes,
            cells: Vec::with_capacity(max_cells),
            covers: Vec::with_capacity(max_pixels),
            start_indices: Vec::with_capacity(max_pixels),
            counts: Vec::with_capacity(max_pixels),
            scanline_width: 0,
            max_cells: 0,
            has_buffer: false,
            usage: MemoryUsage::default(),
        };
        debug!("ARENA: {} bytes, up to {} cells, {} bytes reserved", bytes, max_cells,
               arena.reserved_bytes());
        arena
    }
    /// Budget needed for a scanline `width` and `cells` cells
    pub fn bytes_required(width: usize, cells: usize) -> usize {
        scanline_bytes(width) + cells * CELL_BYTES
    }
    /// Split the budget between a scanline of `width` pixels and cells
    ///
    /// Returns false if the scanline does not fit in the budget, the
    /// Arena cannot be used for drawing until a smaller width is set
    pub fn set_scanline_width(&mut self, width: usize) -> bool {
        let line = scanline_bytes(width);
        if width > usize::from(u16::MAX) || line > self.budget {
            debug!("ARENA: scanline width {} needs {} bytes, budget {}", width, line, self.budget);
            self.scanline_width = 0;
            self.max_cells = 0;
            self.has_buffer = false;
            self.covers.clear();
            self.start_indices.clear();
            self.counts.clear();
            self.cells.clear();
            return false;
        }
        let max_cells = (self.budget - line) / CELL_BYTES;
        self.covers.resize(width + 2, 0);
        self.start_indices.resize(width + 2, 0);
        self.counts.resize(width + 2, 0);
        self.cells.resize(max_cells, Cell::default());
        self.scanline_width = width;
        self.max_cells = max_cells;
        self.has_buffer = true;
        debug!("ARENA: scanline width {}, {} cells", width, max_cells);
        true
    }
    /// Outline, Scanline and usage report borrowing this Arena's storage
    pub fn parts(&mut self) -> (Outline<'_>, Scanline<'_>, &mut MemoryUsage) {
        let width = self.scanline_width;
        let outline = Outline::new(&mut self.cells[.. self.max_cells]);
        let scanline = Scanline::new(&mut self.covers, &mut self.start_indices, &mut self.counts, width);
        (outline, scanline, &mut self.usage)
    }
    pub fn budget(&self) -> usize {
        self.budget
    }
    /// Bytes held for cells and scanline, at most twice the budget
    pub fn reserved_bytes(&self) -> usize {
        self.cells.capacity() * CELL_BYTES
            + self.covers.capacity() * size_of::<u8>()
            + (self.start_indices.capacity() + self.counts.capacity()) * size_of::<u16>()
    }
    pub fn scanline_width(&self) -> usize {
        self.scanline_width
    }
    /// Number of cells available at the current scanline width
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }
    /// A scanline width was set successfully
    pub fn has_buffer(&self) -> bool {
        self.has_buffer
    }
    pub fn record_usage(&mut self, used: usize, missing: usize) {
        self.usage.record(used, missing, self.scanline_width);
    }
    /// Log memory usage after every draw
    pub fn set_write_memory_usage_report(&mut self, write: bool) {
        self.usage.write_report = write;
    }
    pub fn write_memory_usage_report(&self) -> bool {
        self.usage.write_report
    }
    pub fn max_cells_used(&self) -> usize {
        self.usage.max_cells_used()
    }
    pub fn max_cells_missing(&self) -> usize {
        self.usage.max_cells_missing()
    }
    /// Bytes used by the largest draw so far, scanline included
    pub fn used_buffer_size(&self) -> usize {
        scanline_bytes(self.scanline_width) + self.usage.max_cells_used() * CELL_BYTES
    }
    /// Bytes that would have been needed in addition to the budget
    pub fn missing_buffer_size(&self) -> usize {
        self.usage.max_cells_missing() * CELL_BYTES
    }
}
