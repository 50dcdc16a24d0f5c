//! Raster decoding and box averaging.
//!
//! Turns a PNG into one [`ColorSample`] per grid cell. The grid keeps the
//! image's aspect ratio: the square cell size is chosen so that neither the
//! requested column count nor the requested row count is exceeded.

use std::io::Cursor;

use string_art::ColorSample;

use crate::error::SampleError;

/// Decoded image as tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Wrap raw RGBA8 data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SampleError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize * 4 {
            return Err(SampleError::UnsupportedDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }
}

/// Decode PNG bytes into RGBA8, expanding palettes and stripping 16-bit depth.
pub fn decode_png(data: &[u8]) -> Result<RgbaImage, SampleError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| SampleError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| SampleError::PngDecode(e.to_string()))?;
    let raw = &buf[..info.buffer_size()];

    let pixels: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => raw.to_vec(),
        png::ColorType::Rgb => raw
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => raw
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        other => return Err(SampleError::UnsupportedColor(format!("{other:?}"))),
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        "Decoded PNG"
    );
    RgbaImage::new(info.width, info.height, pixels)
}

/// Box-averaged samples of one image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledGrid {
    pub columns: u32,
    pub rows: u32,
    /// Edge length of one square cell in source pixels
    pub cell_size: u32,
    /// `samples[row * columns + column]`, `None` where a box had no opaque pixel
    pub samples: Vec<Option<ColorSample>>,
}

impl SampledGrid {
    /// Sample at a grid position.
    pub fn get(&self, column: u32, row: u32) -> Option<ColorSample> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.samples[(row * self.columns + column) as usize]
    }
}

/// Average `image` into at most `columns x rows` square boxes.
pub fn sample_grid(image: &RgbaImage, columns: u32, rows: u32) -> Result<SampledGrid, SampleError> {
    if columns == 0 || rows == 0 {
        return Err(SampleError::EmptyGrid { columns, rows });
    }

    let cell_size = image
        .width
        .div_ceil(columns)
        .max(image.height.div_ceil(rows));
    let grid_columns = image.width.div_ceil(cell_size);
    let grid_rows = image.height.div_ceil(cell_size);

    let mut samples = vec![None; grid_columns as usize * grid_rows as usize];
    for column in 0..grid_columns {
        for row in 0..grid_rows {
            samples[(row * grid_columns + column) as usize] =
                average_box(image, column * cell_size, row * cell_size, cell_size)?;
        }
    }

    tracing::debug!(
        columns = grid_columns,
        rows = grid_rows,
        cell_size,
        "Sampled image grid"
    );
    Ok(SampledGrid {
        columns: grid_columns,
        rows: grid_rows,
        cell_size,
        samples,
    })
}

/// Root-mean-square color of the opaque pixels in one box.
///
/// Once `size` fully transparent pixels have been seen (in column-major scan
/// order) the box is reported as fully transparent.
fn average_box(
    image: &RgbaImage,
    x_start: u32,
    y_start: u32,
    size: u32,
) -> Result<Option<ColorSample>, SampleError> {
    let mut count = 0u32;
    let mut transparent = 0u32;
    let mut sum = [0.0f64; 3];

    for x in x_start..(x_start + size).min(image.width) {
        for y in y_start..(y_start + size).min(image.height) {
            let [r, g, b, a] = image.pixel(x, y);
            if a == 0 {
                transparent += 1;
            }
            if transparent >= size {
                return Ok(Some(ColorSample::rgba(0, 0, 0, 0)));
            }
            if a > 0 {
                count += 1;
                sum[0] += r as f64 * r as f64;
                sum[1] += g as f64 * g as f64;
                sum[2] += b as f64 * b as f64;
            }
        }
    }

    if count == 0 {
        return Ok(None);
    }
    let n = count as f64;
    let channels = [
        (sum[0] / n).sqrt(),
        (sum[1] / n).sqrt(),
        (sum[2] / n).sqrt(),
        255.0,
    ];
    Ok(Some(ColorSample::from_channels(&channels)?))
}
