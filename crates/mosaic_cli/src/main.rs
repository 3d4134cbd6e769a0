use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use mosaic_render::{convert, ColorSample, ConvertRequest, Destination, MosaicOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render an image as a mosaic of colored glyphs")]
struct Cli {
    /// Input image path
    image: PathBuf,
    /// File or directory containing text to use for characters
    #[arg(long = "with", value_name = "PATH")]
    text_source: Option<PathBuf>,
    /// Background color as hex (e.g. 000, 000000, 000000ff)
    #[arg(long, value_name = "HEX", default_value = "00000000", value_parser = parse_color)]
    bg: ColorSample,
    /// Output file path (.png, .html, .txt or .ansi); prints to the terminal if omitted
    #[arg(long = "as", value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Cli {
    fn to_request(&self) -> ConvertRequest {
        let options = MosaicOptions { background: self.bg, ..MosaicOptions::default() };
        ConvertRequest {
            image: self.image.clone(),
            text_source: self.text_source.clone(),
            output: self.output.clone(),
            options,
        }
    }
}

fn parse_color(value: &str) -> Result<ColorSample, String> {
    value.parse().map_err(|err: mosaic_render::MosaicError| err.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let request = cli.to_request();

    // Reject unknown extensions before touching the input.
    let format = request.format()?;
    debug!("rendering {:?} as {format}", cli.image);

    let destination =
        convert(&request).with_context(|| format!("failed to render {:?}", cli.image))?;

    if let Destination::File(path) = destination {
        println!("Saved to: {}", path.display());
    }

    Ok(())
}
