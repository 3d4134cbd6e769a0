use std::io;

use crate::mosaic::{ColorSample, GlyphSource, PixelGrid};
use crate::MosaicError;

/// Encoding half of a renderer; [`walk`] supplies the traversal.
pub trait CellSink {
    /// A transparent sample. Consumes no glyphs.
    fn blank(&mut self, column: u32, row: u32) -> io::Result<()>;

    /// An opaque sample and the two glyphs drawn for it.
    fn glyphs(
        &mut self,
        column: u32,
        row: u32,
        sample: ColorSample,
        glyphs: [char; 2],
    ) -> io::Result<()>;

    fn end_row(&mut self, row: u32) -> io::Result<()>;
}

/// Visit `grid` row by row, pulling two glyphs for every opaque sample.
///
/// Every sink sees the same order of cells and glyphs.
pub fn walk<G, S>(grid: &PixelGrid, glyphs: &mut G, sink: &mut S) -> Result<(), MosaicError>
where
    G: GlyphSource + ?Sized,
    S: CellSink + ?Sized,
{
    if grid.is_empty() {
        return Err(MosaicError::InvalidGrid);
    }

    for (row, samples) in (0..grid.height).zip(grid.rows()) {
        for (column, &sample) in (0..grid.width).zip(samples) {
            if sample.is_transparent() {
                sink.blank(column, row)?;
                continue;
            }

            // A cell is about twice as tall as a glyph is wide.
            let pair = [glyphs.next_glyph(), glyphs.next_glyph()];
            sink.glyphs(column, row, sample, pair)?;
        }
        sink.end_row(row)?;
    }

    Ok(())
}
