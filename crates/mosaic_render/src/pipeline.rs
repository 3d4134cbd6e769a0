use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::image_pipeline::extract::extract_pixels;
use crate::mosaic::{GlyphStream, PixelGrid};
use crate::render::{AnsiRenderer, HtmlRenderer, OutputFormat, RasterRenderer, TerminalRenderer};
use crate::{MosaicError, MosaicOptions};

/// One conversion run: an image, an optional text source and a destination.
#[derive(Clone, Debug)]
pub struct ConvertRequest {
    pub image: PathBuf,
    /// File or directory supplying glyphs; the placeholder glyph when absent.
    pub text_source: Option<PathBuf>,
    /// Output file; the terminal when absent.
    pub output: Option<PathBuf>,
    pub options: MosaicOptions,
}

impl ConvertRequest {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self { image: image.into(), text_source: None, output: None, options: MosaicOptions::default() }
    }

    pub fn with_text_source(mut self, text_source: impl Into<PathBuf>) -> Self {
        self.text_source = Some(text_source.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_options(mut self, options: MosaicOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> Result<OutputFormat, MosaicError> {
        OutputFormat::from_path(self.output.as_deref())
    }
}

/// Where a finished mosaic was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Terminal,
    File(PathBuf),
}

/// Run the whole pipeline, printing terminal output to stdout.
pub fn convert(request: &ConvertRequest) -> Result<Destination, MosaicError> {
    convert_with_terminal(request, &mut io::stdout().lock())
}

/// Run the whole pipeline, sending terminal output to `terminal`.
pub fn convert_with_terminal<W>(request: &ConvertRequest, terminal: &mut W) -> Result<Destination, MosaicError>
where
    W: Write + ?Sized,
{
    let format = request.format()?;

    let image = request.options.preparer().prepare_path(&request.image)?;
    let grid = extract_pixels(&image);
    debug!("prepared {}x{} grid from {}", grid.width, grid.height, request.image.display());

    let mut glyphs = GlyphStream::from_source(request.text_source.as_deref())?;

    let Some(output) = &request.output else {
        TerminalRenderer.render(&grid, &mut glyphs, terminal)?;
        return Ok(Destination::Terminal);
    };

    let bytes = render_file(format, &grid, &mut glyphs, request.options)?;
    write_output(output, &bytes)?;
    debug!("wrote {} bytes of {format} output to {}", bytes.len(), output.display());
    Ok(Destination::File(output.clone()))
}

fn render_file(
    format: OutputFormat,
    grid: &PixelGrid,
    glyphs: &mut GlyphStream,
    options: MosaicOptions,
) -> Result<Vec<u8>, MosaicError> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            return RasterRenderer::new(options.raster, options.background).render_png(grid, glyphs);
        },
        OutputFormat::Html => HtmlRenderer::new(options.background).render(grid, glyphs, &mut bytes)?,
        OutputFormat::Ansi => AnsiRenderer::new(options.background).render(grid, glyphs, &mut bytes)?,
        OutputFormat::Terminal => TerminalRenderer.render(grid, glyphs, &mut bytes)?,
    }
    Ok(bytes)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), MosaicError> {
    fs::write(path, bytes).map_err(|source| MosaicError::Output { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_output_fails_before_reading_image() {
        let request = ConvertRequest::new("/missing/image.png").with_output("/tmp/out.gif");
        let err = convert_with_terminal(&request, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, MosaicError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_image_is_reported() {
        let request = ConvertRequest::new("/missing/image.png");
        let err = convert_with_terminal(&request, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, MosaicError::ImageNotFound { .. }));
    }
}
