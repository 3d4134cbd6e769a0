//! Turn raster images into colored glyph mosaics.
//!
//! An image is shrunk into a small bounding box, every remaining pixel becomes
//! a pair of glyphs drawn from a rotating text corpus, and the result is
//! written to a terminal, an ANSI text file, an HTML page or a PNG.

mod image_pipeline;
mod mosaic;
mod pipeline;
mod render;

use std::io;
use std::path::PathBuf;

pub use image_pipeline::{
    extract::extract_pixels,
    loader::{decode as decode_image, open as open_image},
    resize::{BoundingBox, TargetGeometry, DEFAULT_BOUND},
    ImagePreparer,
};
pub use mosaic::{
    corpus::{discover_text_files, filter_corpus, is_glyph, is_text_file, sniff_is_text},
    ColorSample, CorpusLoader, FileCorpusLoader, GlyphSource, GlyphStream, PixelGrid,
    PLACEHOLDER_GLYPH,
};
pub use pipeline::{convert, convert_with_terminal, ConvertRequest, Destination};
pub use render::{
    raster::{DEFAULT_FONT_SIZE, DEFAULT_SPACING_FACTOR},
    walk, AnsiRenderer, CellSink, HtmlRenderer, OutputFormat, RasterConfig, RasterRenderer,
    TerminalRenderer, SUPPORTED_EXTENSIONS,
};

#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("invalid color format: {value}")]
    InvalidColor { value: String },
    #[error("unsupported output format {extension} (supported: {})", SUPPORTED_EXTENSIONS)]
    UnsupportedFormat { extension: String },
    #[error("cannot open image {}", .path.display())]
    ImageNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("text source not found: {}", .path.display())]
    TextSourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no text files found in {}", .0.display())]
    NoTextFiles(PathBuf),
    #[error("invalid pixel dimensions")]
    InvalidGrid,
    #[error("cannot create output file {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write mosaic")]
    Write(#[from] io::Error),
    #[error("cannot encode PNG")]
    Encode(#[source] image::ImageError),
}

#[derive(Clone, Copy, Debug)]
pub struct MosaicOptions {
    /// Longest side of the prepared grid, in cells.
    pub bound: u32,
    /// Fill behind transparent cells; ignored by the terminal sink.
    pub background: ColorSample,
    pub raster: RasterConfig,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self { bound: DEFAULT_BOUND, background: ColorSample::TRANSPARENT, raster: RasterConfig::default() }
    }
}

impl MosaicOptions {
    pub fn preparer(&self) -> ImagePreparer {
        ImagePreparer::new(BoundingBox::new(self.bound))
    }
}
