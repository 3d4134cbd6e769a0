use std::io::{self, Write};

use super::walk::{walk, CellSink};
use crate::mosaic::{ColorSample, GlyphSource, PixelGrid};
use crate::MosaicError;

const PRE_STYLE: &str =
    "font-family:'Courier New',Courier,monospace;font-size:8px;line-height:10px;margin:0;white-space:pre;";

/// Renders a standalone HTML page holding the mosaic in a `<pre>` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer {
    /// Page background; a zero alpha selects the default dark page.
    pub background: ColorSample,
}

struct HtmlSink<'a, W: ?Sized> {
    out: &'a mut W,
}

impl<W: Write + ?Sized> CellSink for HtmlSink<'_, W> {
    fn blank(&mut self, _column: u32, _row: u32) -> io::Result<()> {
        self.out.write_all(b"  ")
    }

    fn glyphs(
        &mut self,
        _column: u32,
        _row: u32,
        sample: ColorSample,
        glyphs: [char; 2],
    ) -> io::Result<()> {
        let [r, g, b] = sample.rgb();
        write!(self.out, "<span style=\"color:rgb({r},{g},{b})\">")?;
        for glyph in glyphs {
            write_escaped(&mut *self.out, glyph)?;
        }
        self.out.write_all(b"</span>")
    }

    fn end_row(&mut self, _row: u32) -> io::Result<()> {
        self.out.write_all(b"\n")
    }
}

impl HtmlRenderer {
    pub fn new(background: ColorSample) -> Self {
        Self { background }
    }

    /// CSS `background` declaration for the page body.
    pub fn body_background(&self) -> String {
        let color = self.background;
        if color.is_transparent() {
            return String::from("background:#000;");
        }

        let opacity = f64::from(color.a) / 255.0;
        format!("background:rgba({},{},{},{opacity:.2});", color.r, color.g, color.b)
    }

    pub fn render<G, W>(&self, grid: &PixelGrid, glyphs: &mut G, out: &mut W) -> Result<(), MosaicError>
    where
        G: GlyphSource + ?Sized,
        W: Write + ?Sized,
    {
        if grid.is_empty() {
            return Err(MosaicError::InvalidGrid);
        }

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "  <head>")?;
        writeln!(out, "    <meta charset=\"UTF-8\">")?;
        writeln!(out, "  </head>")?;
        writeln!(out, "  <body style=\"{}margin:20px;\">", self.body_background())?;
        writeln!(out, "    <pre style=\"{PRE_STYLE}\">")?;

        walk(grid, glyphs, &mut HtmlSink { out: &mut *out })?;

        writeln!(out, "    </pre>")?;
        writeln!(out, "  </body>")?;
        writeln!(out, "</html>")?;
        Ok(())
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

fn write_escaped<W: Write + ?Sized>(out: &mut W, glyph: char) -> io::Result<()> {
    match glyph {
        '&' => out.write_all(b"&amp;"),
        '<' => out.write_all(b"&lt;"),
        '>' => out.write_all(b"&gt;"),
        '"' => out.write_all(b"&quot;"),
        _ => write!(out, "{glyph}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::GlyphStream;

    const RED: ColorSample = ColorSample::opaque(255, 0, 0);
    const CLEAR: ColorSample = ColorSample::TRANSPARENT;

    fn page(grid: &PixelGrid, background: ColorSample) -> String {
        HtmlRenderer::new(background)
            .render_to_string(grid, &mut GlyphStream::placeholder())
            .unwrap()
    }

    #[test]
    fn renders_document_skeleton() {
        let grid = PixelGrid::from_rows(vec![vec![RED, CLEAR]]).unwrap();
        let html = page(&grid, CLEAR);

        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<body style=\"background:#000;margin:20px;\">"));
        assert!(html.contains("<span style=\"color:rgb(255,0,0)\">aa</span>  \n"));
        assert!(html.ends_with("    </pre>\n  </body>\n</html>\n"));
    }

    #[test]
    fn background_uses_rgba_opacity() {
        let renderer = HtmlRenderer::new(ColorSample::new(10, 20, 30, 128));
        assert_eq!(renderer.body_background(), "background:rgba(10,20,30,0.50);");

        let renderer = HtmlRenderer::new(ColorSample::opaque(255, 255, 255));
        assert_eq!(renderer.body_background(), "background:rgba(255,255,255,1.00);");
    }

    struct Cycle(Vec<char>, usize);

    impl GlyphSource for Cycle {
        fn next_glyph(&mut self) -> char {
            let glyph = self.0[self.1 % self.0.len()];
            self.1 += 1;
            glyph
        }
    }

    #[test]
    fn glyphs_are_escaped() {
        let grid = PixelGrid::from_rows(vec![vec![RED, RED]]).unwrap();
        let mut glyphs = Cycle("<&>\"".chars().collect(), 0);

        let html = HtmlRenderer::default().render_to_string(&grid, &mut glyphs).unwrap();
        assert!(html.contains(">&lt;&amp;</span><span style=\"color:rgb(255,0,0)\">&gt;&quot;</span>\n"));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let grid = PixelGrid::from_rows(Vec::new()).unwrap();
        let err = HtmlRenderer::default().render_to_string(&grid, &mut GlyphStream::placeholder());
        assert!(matches!(err, Err(MosaicError::InvalidGrid)));
    }
}
