use string_art::StringArtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Unsupported PNG color layout: {0}")]
    UnsupportedColor(String),

    #[error("Grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },

    #[error("Invalid averaged color: {0}")]
    Color(#[from] StringArtError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("SVG write error: {0}")]
    SvgWrite(#[from] std::fmt::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Line synthesis error: {0}")]
    Synthesis(#[from] StringArtError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_error_png_decode() {
        let error = SampleError::PngDecode("bad signature".to_string());
        assert_eq!(error.to_string(), "PNG decode error: bad signature");
    }

    #[test]
    fn test_sample_error_empty_grid() {
        let error = SampleError::EmptyGrid {
            columns: 0,
            rows: 4,
        };
        assert_eq!(
            error.to_string(),
            "Grid must have at least one column and one row, got 0x4"
        );
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 0,
            height: 9999,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 0x9999");
    }

    #[test]
    fn test_render_error_pixmap_allocation() {
        let error = RenderError::PixmapAllocation;
        assert_eq!(error.to_string(), "Failed to allocate pixmap");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_render_error_from_fmt_error() {
        let error: RenderError = std::fmt::Error.into();
        assert_eq!(
            error.to_string(),
            "SVG write error: an error occurred when formatting an argument"
        );
    }

    #[test]
    fn test_pipeline_error_from_sample_error() {
        let sample_error = SampleError::UnsupportedDimensions {
            width: 0,
            height: 0,
        };
        let pipeline_error: PipelineError = sample_error.into();
        match pipeline_error {
            PipelineError::Sample(_) => {}
            _ => panic!("Expected Sample variant"),
        }
    }

    #[test]
    fn test_pipeline_error_from_core_error() {
        let pipeline_error: PipelineError = StringArtError::InvalidCellSize(0.0).into();
        assert_eq!(
            pipeline_error.to_string(),
            "Line synthesis error: invalid cell size: 0"
        );
    }
}
