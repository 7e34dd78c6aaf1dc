mod common;

use cwr::{Arena, Canvas, Circle, FrameBuffer, PixelFormat, PixelPainter};
use cwr::{Rect, Rgba8, SolidColor, CELL_BYTES, SCANLINE_BYTES_PER_PIXEL};

fn draw(arena: &mut Arena, radius: i32) -> bool {
    let mut fb = FrameBuffer::new(40, 40, PixelFormat::Rgb565);
    let mut painter = PixelPainter::new(PixelFormat::Rgb565, SolidColor::new(Rgba8::white()));
    let area = Rect::new(0, 0, 40, 40);
    let mut canvas = Canvas::new(arena, fb.lock(), area, area, &mut painter).unwrap();
    canvas.add_path(&Circle::new().center(20, 20).radius(radius));
    canvas.render(255)
}

#[test]
fn largest_draw_is_reported() {
    common::init();
    let mut arena = Arena::new(Arena::bytes_required(40, 1000));
    arena.set_write_memory_usage_report(true);
    assert!(arena.write_memory_usage_report());
    assert_eq!(arena.max_cells_used(), 0);

    assert!(draw(&mut arena, 5));
    let small = arena.max_cells_used();
    assert!(small > 0);
    assert!(draw(&mut arena, 15));
    let large = arena.max_cells_used();
    assert!(large > small);
    assert!(draw(&mut arena, 5));
    assert_eq!(arena.max_cells_used(), large);

    assert_eq!(arena.max_cells_missing(), 0);
    assert_eq!(arena.missing_buffer_size(), 0);
    assert_eq!(arena.used_buffer_size(), 42 * SCANLINE_BYTES_PER_PIXEL + large * CELL_BYTES);
}

#[test]
fn missing_cells_are_reported() {
    common::init();
    let mut arena = Arena::new(Arena::bytes_required(40, 20));
    assert!(! draw(&mut arena, 15));
    let missing = arena.max_cells_missing();
    assert!(missing > 0);
    assert_eq!(arena.missing_buffer_size(), missing * CELL_BYTES);
    assert_eq!(arena.max_cells(), 20);
    assert_eq!(arena.max_cells_used(), 20);
    assert_eq!(arena.budget(), 42 * SCANLINE_BYTES_PER_PIXEL + 20 * CELL_BYTES);
}

#[test]
fn budget_is_repartitioned() {
    let mut arena = Arena::new(1000);
    assert!(! arena.has_buffer());
    let reserved = arena.reserved_bytes();
    assert!(reserved >= 1000 && reserved <= 2000);
    assert!(arena.set_scanline_width(40));
    assert_eq!(arena.scanline_width(), 40);
    let wide = arena.max_cells();
    assert_eq!(wide, (1000 - 42 * SCANLINE_BYTES_PER_PIXEL) / CELL_BYTES);
    assert!(arena.set_scanline_width(4));
    assert!(arena.max_cells() > wide);
    assert!(! arena.set_scanline_width(usize::from(u16::MAX) + 1));
    assert!(! arena.has_buffer());
    assert_eq!(arena.max_cells(), 0);
    assert!(arena.set_scanline_width(198));
    assert!(arena.set_scanline_width(0));
    assert_eq!(arena.max_cells(), (1000 - 2 * SCANLINE_BYTES_PER_PIXEL) / CELL_BYTES);
    // Partitioning never grows the reservation
    assert_eq!(arena.reserved_bytes(), reserved);
}
