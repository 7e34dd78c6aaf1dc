mod common;

use cwr::ppm;
use cwr::{Arena, Canvas, Circle, FrameBuffer, PixelFormat, PixelPainter};
use cwr::{Rect, Rgba8, SolidColor};

fn frame(format: PixelFormat) -> FrameBuffer {
    let mut arena = Arena::new(Arena::bytes_required(24, 500));
    let mut fb = FrameBuffer::new(24, 16, format);
    fb.clear(Rgba8::rgb(0, 0, 255));
    let mut painter = PixelPainter::new(format, SolidColor::new(Rgba8::rgb(255, 255, 0)));
    {
        let area = Rect::new(0, 0, 24, 16);
        let mut canvas = Canvas::new(&mut arena, fb.lock(), area, area, &mut painter).unwrap();
        canvas.add_path(&Circle::new().center(12, 8).radius(6));
        assert!(canvas.render(255));
    }
    fb
}

#[test]
fn save_and_load() {
    common::init();
    let fb = frame(PixelFormat::Rgb888);
    let path = std::env::temp_dir().join("cwr_snapshot_test.png");
    ppm::write_file(&fb, &path).unwrap();

    let (data, w, h) = ppm::read_file(&path).unwrap();
    assert_eq!((w, h), (24, 16));
    assert_eq!(data, ppm::to_rgb(&fb));
    assert_eq!(&data[.. 3], &[0, 0, 255]);
    let center = (8 * 24 + 12) * 3;
    assert_eq!(&data[center .. center + 3], &[255, 255, 0]);
    assert!(ppm::img_diff(&path, &path).unwrap());

    let other = std::env::temp_dir().join("cwr_snapshot_test_other.png");
    let mut changed = frame(PixelFormat::Rgb888);
    changed.set_pixel(0, 0, Rgba8::white());
    ppm::write_file(&changed, &other).unwrap();
    assert!(! ppm::img_diff(&path, &other).unwrap());
}

#[test]
fn formats_saved_as_rgb() {
    common::init();
    let fb = frame(PixelFormat::Argb8888);
    let path = std::env::temp_dir().join("cwr_snapshot_argb.bmp");
    ppm::write_file(&fb, &path).unwrap();
    let (data, _, _) = ppm::read_file(&path).unwrap();
    assert_eq!(data, ppm::to_rgb(&fb));
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("cwr_snapshot_does_not_exist.png");
    assert!(ppm::read_file(&path).is_err());
}
