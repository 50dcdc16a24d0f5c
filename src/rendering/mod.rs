pub mod svg;
pub mod svg_to_png;

pub use svg::{line_art_svg, pixelize_svg, LineArtStyle};
pub use svg_to_png::SvgRenderer;
