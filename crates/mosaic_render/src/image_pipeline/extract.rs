use image::DynamicImage;

use crate::mosaic::{ColorSample, PixelGrid};

/// Copy every pixel of `image` into a grid, converting to 8 bits per channel.
pub fn extract_pixels(image: &DynamicImage) -> PixelGrid {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let samples = rgba.pixels().map(|pixel| ColorSample::from(*pixel)).collect();
    PixelGrid::new(width, height, samples)
}
