//! Test fixtures: small PNG images built in memory.

use std::io::Cursor;

/// Encode RGBA8 pixels as a PNG.
pub fn encode_rgba(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }
    buf.into_inner()
}

/// Encode 8-bit grayscale pixels as a PNG.
pub fn encode_gray(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }
    buf.into_inner()
}

/// `size x size` image with a dark diagonal band on white.
pub fn diagonal_band(size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let near = (x as i64 - y as i64).abs() < (size as i64 / 6).max(1);
            let v = if near { 20 } else { 250 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    encode_rgba(size, size, &pixels)
}

/// Image whose left half is transparent and right half red.
pub fn half_transparent(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _y in 0..height {
        for x in 0..width {
            if x < width / 2 {
                pixels.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                pixels.extend_from_slice(&[200, 20, 20, 255]);
            }
        }
    }
    encode_rgba(width, height, &pixels)
}
