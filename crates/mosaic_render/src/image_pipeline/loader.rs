use std::fs;
use std::path::Path;

use image::{DynamicImage, GenericImageView};
use log::debug;

use crate::MosaicError;

/// Decode an in-memory image in any format the `image` crate recognises.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, MosaicError> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    debug!("decoded {width}x{height} image");
    Ok(image)
}

pub fn open(path: &Path) -> Result<DynamicImage, MosaicError> {
    let bytes = fs::read(path)
        .map_err(|source| MosaicError::ImageNotFound { path: path.to_path_buf(), source })?;
    decode(&bytes)
}
