//! Frame buffer snapshots
//!
//! Frame buffers of any format are saved as 8 bit RGB images, the file
//! type follows the extension (png or bmp).
//!
use crate::buffer::FrameBuffer;
use crate::error::Error;

use log::debug;
use std::path::Path;

/// Read an image as RGB bytes, returns (data, width, height)
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize), Error> {
    let img = image::open(filename)?.to_rgb8();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

/// RGB bytes of a frame buffer as seen on the display
pub fn to_rgb(fb: &FrameBuffer) -> Vec<u8> {
    let (w, h) = (fb.width(), fb.height());
    let mut buf = Vec::with_capacity(w * h * 3);
    for y in 0 .. h {
        for x in 0 .. w {
            let c = fb.pixel(x, y);
            buf.extend_from_slice(&[c.r, c.g, c.b]);
        }
    }
    buf
}

/// Save a frame buffer as an image
pub fn write_file<P: AsRef<Path>>(fb: &FrameBuffer, filename: P) -> Result<(), Error> {
    let buf = to_rgb(fb);
    image::save_buffer(filename, &buf, fb.width() as u32, fb.height() as u32,
                       image::ColorType::Rgb8)?;
    Ok(())
}

/// Compare two image files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, Error> {
    let (d1,w1,h1) = read_file(f1)?;
    let (d2,w2,h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        debug!("IMG DIFF: sizes differ {}x{} {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            debug!("IMG DIFF: {} [{},{},{}]: {} {}", i, (i/3)%w1,(i/3)/w1,i%3, v1,v2);
            flag = false;
        }
    }
    Ok(flag)
}
