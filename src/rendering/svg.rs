//! SVG serializers.
//!
//! Pure functions returning a `String`; writing to disk and rasterizing is
//! the caller's business.

use std::fmt::Write;

use string_art::{Endpoint, Line};

use crate::error::RenderError;
use crate::sampling::SampledGrid;

/// Stroke of the endpoint markers, 15% gray.
const ENDPOINT_STROKE: [u8; 3] = [38, 38, 38];

/// Drawing options for [`line_art_svg`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineArtStyle {
    /// Line stroke width in pixels
    pub stroke_width: f64,
    /// Draw a small circle on every perimeter endpoint
    pub draw_endpoints: bool,
}

impl Default for LineArtStyle {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            draw_endpoints: false,
        }
    }
}

fn write_preamble(out: &mut String, width: f64, height: f64) -> std::fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
    )
}

fn rgb([r, g, b]: [u8; 3]) -> String {
    format!("rgb({r},{g},{b})")
}

/// Line-art document: optional endpoint markers, then one `<line>` per line
/// in the given order.
pub fn line_art_svg(
    width: f64,
    height: f64,
    lines: &[Line],
    endpoints: &[Endpoint],
    style: &LineArtStyle,
) -> Result<String, RenderError> {
    let mut out = String::new();
    write_preamble(&mut out, width, height)?;

    if style.draw_endpoints {
        let stroke = rgb(ENDPOINT_STROKE);
        for endpoint in endpoints {
            writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="1" fill="white" stroke="{stroke}"/>"#,
                endpoint.location.x, endpoint.location.y,
            )?;
        }
    }

    for line in lines {
        writeln!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            line.p1.x,
            line.p1.y,
            line.p2.x,
            line.p2.y,
            rgb(line.color),
            style.stroke_width,
        )?;
    }

    out.push_str("</svg>\n");
    Ok(out)
}

/// Mosaic document with one unit square per opaque sample.
pub fn pixelize_svg(grid: &SampledGrid) -> Result<String, RenderError> {
    let mut out = String::new();
    write_preamble(&mut out, grid.columns as f64, grid.rows as f64)?;

    for column in 0..grid.columns {
        for row in 0..grid.rows {
            let Some(sample) = grid.get(column, row) else {
                continue;
            };
            if sample.is_transparent() {
                continue;
            }
            writeln!(
                out,
                r#"  <rect x="{column}" y="{row}" width="1" height="1" fill="{}"/>"#,
                rgb(sample.to_bytes()),
            )?;
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}
