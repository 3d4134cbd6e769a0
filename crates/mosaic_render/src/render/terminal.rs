use std::io::Write;

use super::ansi::AnsiSink;
use super::walk::walk;
use crate::mosaic::{GlyphSource, PixelGrid};
use crate::MosaicError;

/// Renders straight to a live terminal. Background colors are not applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn render<G, W>(&self, grid: &PixelGrid, glyphs: &mut G, out: &mut W) -> Result<(), MosaicError>
    where
        G: GlyphSource + ?Sized,
        W: Write + ?Sized,
    {
        if grid.is_empty() {
            return Err(MosaicError::InvalidGrid);
        }

        writeln!(out)?;
        walk(grid, glyphs, &mut AnsiSink::new(&mut *out, None, " "))?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
