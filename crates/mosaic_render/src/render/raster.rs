use std::io::{self, Cursor};

use font8x8::{
    UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS,
    MISC_FONTS,
};
use image::{ImageOutputFormat, Pixel, Rgba, RgbaImage};
use log::debug;

use super::walk::{walk, CellSink};
use crate::mosaic::{ColorSample, GlyphSource, PixelGrid};
use crate::MosaicError;

pub const DEFAULT_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_SPACING_FACTOR: f32 = 0.75;

/// Side of the square bitmap glyphs in the embedded font.
const BITMAP_SIZE: u32 = 8;

/// Drawn for characters the embedded font lacks.
const MISSING_GLYPH: char = '?';

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterConfig {
    /// Nominal font size in pixels.
    pub font_size: f32,
    /// Fraction of the font size occupied by one grid cell.
    pub spacing_factor: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { font_size: DEFAULT_FONT_SIZE, spacing_factor: DEFAULT_SPACING_FACTOR }
    }
}

impl RasterConfig {
    /// Edge length of one square cell in pixels.
    pub fn cell_size(&self) -> f32 {
        (self.font_size * self.spacing_factor).max(1.0)
    }

    pub fn canvas_size(&self, grid: &PixelGrid) -> (u32, u32) {
        let cell = self.cell_size();
        ((cell * grid.width as f32) as u32, (cell * grid.height as f32) as u32)
    }
}

/// Rasterizes the mosaic onto an RGBA canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterRenderer {
    pub config: RasterConfig,
    /// Canvas fill, alpha included.
    pub background: ColorSample,
}

struct RasterSink<'a> {
    canvas: &'a mut RgbaImage,
    cell: f32,
}

impl RasterSink<'_> {
    /// Draw `glyph` scaled into a `width` x `height` box whose bottom edge is `baseline`.
    fn draw_glyph(&mut self, glyph: char, left: u32, baseline: u32, width: u32, height: u32, color: Rgba<u8>) {
        let bitmap = glyph_bitmap(glyph);
        let top = baseline.saturating_sub(height);

        for dy in 0..height {
            let bits = bitmap[(dy * BITMAP_SIZE / height) as usize];
            if bits == 0 {
                continue;
            }

            for dx in 0..width {
                // Bit 0 is the leftmost pixel of a row.
                if bits & (1 << (dx * BITMAP_SIZE / width)) == 0 {
                    continue;
                }

                let (x, y) = (left + dx, top + dy);
                if x < self.canvas.width() && y < self.canvas.height() {
                    self.canvas.get_pixel_mut(x, y).blend(&color);
                }
            }
        }
    }
}

impl CellSink for RasterSink<'_> {
    fn blank(&mut self, _column: u32, _row: u32) -> io::Result<()> {
        Ok(())
    }

    fn glyphs(
        &mut self,
        column: u32,
        row: u32,
        sample: ColorSample,
        glyphs: [char; 2],
    ) -> io::Result<()> {
        let left = (column as f32 * self.cell) as u32;
        // Text is anchored at its baseline, one cell below the cell's top.
        let baseline = ((row + 1) as f32 * self.cell) as u32;
        let height = (self.cell as u32).max(1);
        let width = (height / 2).max(1);
        let color = Rgba::from(sample);

        for (index, glyph) in (0u32..).zip(glyphs) {
            self.draw_glyph(glyph, left + index * width, baseline, width, height, color);
        }
        Ok(())
    }

    fn end_row(&mut self, _row: u32) -> io::Result<()> {
        Ok(())
    }
}

impl RasterRenderer {
    pub fn new(config: RasterConfig, background: ColorSample) -> Self {
        Self { config, background }
    }

    pub fn render<G>(&self, grid: &PixelGrid, glyphs: &mut G) -> Result<RgbaImage, MosaicError>
    where
        G: GlyphSource + ?Sized,
    {
        if grid.is_empty() {
            return Err(MosaicError::InvalidGrid);
        }

        let (width, height) = self.config.canvas_size(grid);
        debug!("rasterizing {}x{} grid onto {width}x{height} canvas", grid.width, grid.height);

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba::from(self.background));
        let mut sink = RasterSink { canvas: &mut canvas, cell: self.config.cell_size() };
        walk(grid, glyphs, &mut sink)?;
        Ok(canvas)
    }

    /// Render and encode as PNG.
    pub fn render_png<G>(&self, grid: &PixelGrid, glyphs: &mut G) -> Result<Vec<u8>, MosaicError>
    where
        G: GlyphSource + ?Sized,
    {
        let canvas = self.render(grid, glyphs)?;
        let mut bytes = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .map_err(MosaicError::Encode)?;
        Ok(bytes)
    }
}

fn glyph_bitmap(glyph: char) -> [u8; 8] {
    lookup(glyph).or_else(|| lookup(MISSING_GLYPH)).unwrap_or([0; 8])
}

fn lookup(glyph: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(glyph)
        .or_else(|| LATIN_FONTS.get(glyph))
        .or_else(|| GREEK_FONTS.get(glyph))
        .or_else(|| BOX_FONTS.get(glyph))
        .or_else(|| BLOCK_FONTS.get(glyph))
        .or_else(|| HIRAGANA_FONTS.get(glyph))
        .or_else(|| MISC_FONTS.get(glyph))
}
