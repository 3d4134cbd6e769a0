use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::debug;

/// Longest side, in cells, of a prepared grid.
pub const DEFAULT_BOUND: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetGeometry {
    pub columns: u32,
    pub rows: u32,
}

/// Box that a prepared image has to fit in, never enlarging the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub bound: u32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self { bound: DEFAULT_BOUND }
    }
}

impl BoundingBox {
    pub fn new(bound: u32) -> Self {
        Self { bound: bound.max(1) }
    }

    pub fn derive(&self, source_width: u32, source_height: u32) -> Option<TargetGeometry> {
        if source_width == 0 || source_height == 0 {
            return None;
        }

        let bound = f64::from(self.bound.max(1));
        let width = f64::from(source_width);
        let height = f64::from(source_height);
        let scale = (bound / width).min(bound / height).min(1.0);

        let columns = ((width * scale).floor() as u32).clamp(1, source_width);
        let rows = ((height * scale).floor() as u32).clamp(1, source_height);
        Some(TargetGeometry { columns, rows })
    }

    /// Downscale `image` into the box with a Lanczos filter.
    ///
    /// Images already inside the box are returned untouched.
    pub fn fit(&self, image: DynamicImage) -> Option<DynamicImage> {
        let (width, height) = image.dimensions();
        let geometry = self.derive(width, height)?;

        if (geometry.columns, geometry.rows) == (width, height) {
            return Some(image);
        }

        debug!("resizing {width}x{height} to {}x{}", geometry.columns, geometry.rows);
        Some(image.resize_exact(geometry.columns, geometry.rows, FilterType::Lanczos3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(width: u32, height: u32) -> (u32, u32) {
        let geometry = BoundingBox::default().derive(width, height).unwrap();
        (geometry.columns, geometry.rows)
    }

    #[test]
    fn shrinks_longer_side_to_bound() {
        assert_eq!(derive(60, 30), (30, 15));
        assert_eq!(derive(30, 120), (7, 30));
        assert_eq!(derive(240, 240), (30, 30));
    }

    #[test]
    fn never_upscales() {
        assert_eq!(derive(10, 5), (10, 5));
        assert_eq!(derive(30, 30), (30, 30));
        assert_eq!(derive(1, 1), (1, 1));
    }

    #[test]
    fn thin_images_keep_one_cell() {
        assert_eq!(derive(960, 1), (30, 1));
        assert_eq!(derive(1, 960), (1, 30));
    }

    #[test]
    fn empty_source_has_no_geometry() {
        assert_eq!(BoundingBox::default().derive(0, 10), None);
        assert_eq!(BoundingBox::default().derive(10, 0), None);
    }

    #[test]
    fn custom_bound() {
        let geometry = BoundingBox::new(4).derive(16, 8).unwrap();
        assert_eq!(geometry, TargetGeometry { columns: 4, rows: 2 });
    }

    #[test]
    fn fit_leaves_small_images_alone() {
        let image = DynamicImage::new_rgba8(3, 2);
        let fitted = BoundingBox::default().fit(image).unwrap();
        assert_eq!(fitted.dimensions(), (3, 2));
    }

    #[test]
    fn fit_resizes_large_images() {
        let image = DynamicImage::new_rgba8(90, 45);
        let fitted = BoundingBox::default().fit(image).unwrap();
        let (width, height) = fitted.dimensions();
        assert!(width <= 30 && height <= 30);
        assert!(width >= 29 && height >= 14);
    }
}
