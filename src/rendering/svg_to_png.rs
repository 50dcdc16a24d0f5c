use crate::error::RenderError;
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use tiny_skia::Pixmap;

/// Largest raster edge the renderer will allocate.
pub const MAX_DIMENSION: u32 = 16_384;

/// Rasterizes SVG documents onto a white background and encodes them as PNG.
///
/// Output is 8-bit RGB, first encoded with fast settings and then
/// re-compressed with oxipng.
pub struct SvgRenderer {
    options: usvg::Options<'static>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Render SVG to PNG bytes, scaling the document's own size by `scale`.
    pub fn render_to_png(&self, svg_data: &[u8], scale: f32) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg_data, scale)?;

        let rgb: Vec<u8> = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
            .collect();

        // Fast settings, oxipng re-compresses
        let png_bytes = encode_png(pixmap.width(), pixmap.height(), &rgb)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);

        tracing::debug!(
            width = pixmap.width(),
            height = pixmap.height(),
            bytes = optimized.len(),
            "Rendered PNG"
        );
        Ok(optimized)
    }

    /// Parse and rasterize SVG to an opaque pixmap
    fn rasterize_svg(&self, svg_data: &[u8], scale: f32) -> Result<Pixmap, RenderError> {
        let tree = usvg::Tree::from_data(svg_data, &self.options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let width = (svg_size.width() * scale).ceil() as u32;
        let height = (svg_size.height() * scale).ceil() as u32;
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::UnsupportedDimensions { width, height });
        }

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode 8-bit RGB pixel data as a PNG.
fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::decode_png;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4" viewBox="0 0 8 4">
  <rect x="0" y="0" width="4" height="4" fill="rgb(0,0,0)"/>
</svg>"#;

    #[test]
    fn test_render_round_trips_through_decoder() {
        let png = SvgRenderer::new().render_to_png(SQUARE.as_bytes(), 2.0).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let image = decode_png(&png).unwrap();
        assert_eq!((image.width, image.height), (16, 8));
        // Left half black, right half white background
        assert_eq!(&image.pixels[..4], &[0, 0, 0, 255]);
        let last = image.pixels.len() - 4;
        assert_eq!(&image.pixels[last..], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_render_rejects_invalid_svg() {
        let result = SvgRenderer::new().render_to_png(b"<not-svg", 1.0);
        assert!(matches!(result, Err(RenderError::SvgParse(_))));
    }

    #[test]
    fn test_render_rejects_zero_scale() {
        let result = SvgRenderer::new().render_to_png(SQUARE.as_bytes(), 0.0);
        assert!(matches!(
            result,
            Err(RenderError::UnsupportedDimensions { .. })
        ));
    }
}
