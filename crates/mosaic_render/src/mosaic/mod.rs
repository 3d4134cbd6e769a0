pub mod color;
pub mod corpus;
pub mod glyphs;
pub mod grid;

pub use color::ColorSample;
pub use corpus::{CorpusLoader, FileCorpusLoader};
pub use glyphs::{GlyphSource, GlyphStream, PLACEHOLDER_GLYPH};
pub use grid::PixelGrid;
