pub mod ansi;
pub mod html;
pub mod raster;
pub mod terminal;
pub mod walk;

use std::fmt;
use std::path::Path;

use crate::MosaicError;

pub use ansi::AnsiRenderer;
pub use html::HtmlRenderer;
pub use raster::{RasterConfig, RasterRenderer};
pub use terminal::TerminalRenderer;
pub use walk::{walk, CellSink};

/// Extensions accepted for file output, as listed in error messages.
pub const SUPPORTED_EXTENSIONS: &str = ".png, .html, .txt, .ansi";

/// Where a rendered mosaic goes, chosen from the output path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Png,
    Html,
    Ansi,
}

impl OutputFormat {
    /// Pick a sink from the extension of `output`, or the terminal when absent.
    pub fn from_path(output: Option<&Path>) -> Result<Self, MosaicError> {
        let Some(output) = output else {
            return Ok(OutputFormat::Terminal);
        };

        let extension = output
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "html" => Ok(OutputFormat::Html),
            "txt" | "ansi" => Ok(OutputFormat::Ansi),
            _ => {
                let extension =
                    if extension.is_empty() { extension } else { format!(".{extension}") };
                Err(MosaicError::UnsupportedFormat { extension })
            },
        }
    }

    pub fn is_file(&self) -> bool {
        !matches!(self, OutputFormat::Terminal)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Png => "png",
            OutputFormat::Html => "html",
            OutputFormat::Ansi => "ansi",
        };
        f.write_str(name)
    }
}
