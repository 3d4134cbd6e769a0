use std::io::{self, Write};

use super::walk::{walk, CellSink};
use crate::mosaic::{ColorSample, GlyphSource, PixelGrid};
use crate::MosaicError;

pub(crate) const RESET: &str = "\x1b[0m";

/// Writes cells as 24-bit ANSI escape sequences.
pub(crate) struct AnsiSink<'a, W: ?Sized> {
    out: &'a mut W,
    /// Background escape emitted in front of every cell.
    background: Option<String>,
    /// Prefix written before the first cell of each row.
    indent: &'static str,
}

impl<'a, W: Write + ?Sized> AnsiSink<'a, W> {
    pub(crate) fn new(out: &'a mut W, background: Option<ColorSample>, indent: &'static str) -> Self {
        let background = background
            .filter(|color| !color.is_transparent())
            .map(|color| format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b));
        Self { out, background, indent }
    }

    fn start_cell(&mut self, column: u32) -> io::Result<()> {
        if column == 0 {
            self.out.write_all(self.indent.as_bytes())?;
        }
        if let Some(background) = &self.background {
            self.out.write_all(background.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> CellSink for AnsiSink<'_, W> {
    fn blank(&mut self, column: u32, _row: u32) -> io::Result<()> {
        self.start_cell(column)?;
        if self.background.is_some() {
            write!(self.out, "  {RESET}")
        } else {
            self.out.write_all(b"  ")
        }
    }

    fn glyphs(
        &mut self,
        column: u32,
        _row: u32,
        sample: ColorSample,
        glyphs: [char; 2],
    ) -> io::Result<()> {
        self.start_cell(column)?;
        let [r, g, b] = sample.rgb();
        write!(self.out, "\x1b[38;2;{r};{g};{b}m{}{}{RESET}", glyphs[0], glyphs[1])
    }

    fn end_row(&mut self, _row: u32) -> io::Result<()> {
        self.out.write_all(b"\n")
    }
}

/// ANSI text renderer for `.txt` and `.ansi` files.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiRenderer {
    /// Painted behind every cell when its alpha is non-zero.
    pub background: ColorSample,
}

impl AnsiRenderer {
    pub fn new(background: ColorSample) -> Self {
        Self { background }
    }

    pub fn render<G, W>(&self, grid: &PixelGrid, glyphs: &mut G, out: &mut W) -> Result<(), MosaicError>
    where
        G: GlyphSource + ?Sized,
        W: Write + ?Sized,
    {
        let mut sink = AnsiSink::new(out, Some(self.background), "");
        walk(grid, glyphs, &mut sink)
    }

    pub fn render_to_string<G>(&self, grid: &PixelGrid, glyphs: &mut G) -> Result<String, MosaicError>
    where
        G: GlyphSource + ?Sized,
    {
        let mut out = Vec::new();
        self.render(grid, glyphs, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
