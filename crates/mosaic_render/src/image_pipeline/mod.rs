pub mod extract;
pub mod loader;
pub mod resize;

use std::path::Path;

use image::DynamicImage;

use crate::MosaicError;
use resize::BoundingBox;

/// Decodes source images and shrinks them into the bounding box.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImagePreparer {
    pub bounds: BoundingBox,
}

impl ImagePreparer {
    pub fn new(bounds: BoundingBox) -> Self {
        Self { bounds }
    }

    pub fn prepare(&self, raw: &[u8]) -> Result<DynamicImage, MosaicError> {
        self.prepare_image(loader::decode(raw)?)
    }

    pub fn prepare_path(&self, path: &Path) -> Result<DynamicImage, MosaicError> {
        self.prepare_image(loader::open(path)?)
    }

    pub fn prepare_image(&self, image: DynamicImage) -> Result<DynamicImage, MosaicError> {
        self.bounds.fit(image).ok_or(MosaicError::InvalidGrid)
    }
}
