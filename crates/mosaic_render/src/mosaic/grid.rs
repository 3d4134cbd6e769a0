use super::color::ColorSample;
use crate::MosaicError;

/// Row-major grid of color samples with the origin at the top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: u32,
    pub height: u32,
    samples: Vec<ColorSample>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, samples: Vec<ColorSample>) -> Self {
        assert_eq!(width as usize * height as usize, samples.len());
        Self { width, height, samples }
    }

    /// Build a grid from explicit rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<ColorSample>>) -> Result<Self, MosaicError> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(MosaicError::InvalidGrid);
        }

        let height = u32::try_from(rows.len()).map_err(|_| MosaicError::InvalidGrid)?;
        let width = u32::try_from(width).map_err(|_| MosaicError::InvalidGrid)?;
        let samples = rows.into_iter().flatten().collect();
        Ok(Self { width, height, samples })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, column: u32, row: u32) -> Option<ColorSample> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.samples.get(row as usize * self.width as usize + column as usize).copied()
    }

    pub fn samples(&self) -> &[ColorSample] {
        &self.samples
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ColorSample]> + '_ {
        // `chunks` panics on zero, an empty grid simply has no rows.
        let width = (self.width as usize).max(1);
        self.samples.chunks(width)
    }

    pub fn opaque_count(&self) -> usize {
        self.samples.iter().filter(|sample| !sample.is_transparent()).count()
    }
}
