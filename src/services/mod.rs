pub mod line_art;

pub use line_art::{LineArtOutput, LineArtPipeline, PixelizeOutput};
