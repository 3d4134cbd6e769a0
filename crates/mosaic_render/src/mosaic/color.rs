use std::fmt;
use std::str::FromStr;

use crate::MosaicError;

/// Color of one source pixel, normalized to 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorSample {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Zero alpha marks a blank cell; any other alpha counts as opaque.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `rgb`, `rrggbb` or `rrggbbaa` hex, optionally prefixed with `0x`.
    ///
    /// The short form duplicates each digit and the six digit form is fully opaque.
    pub fn from_hex(value: &str) -> Result<Self, MosaicError> {
        let invalid = || MosaicError::InvalidColor { value: value.to_owned() };

        let cleaned = value.trim().to_ascii_lowercase();
        let cleaned = cleaned.strip_prefix("0x").unwrap_or(&cleaned);

        let digits = match cleaned.len() {
            3 => cleaned.chars().flat_map(|digit| [digit, digit]).collect::<String>(),
            6 | 8 => cleaned.to_owned(),
            _ => return Err(invalid()),
        };

        let bytes = hex::decode(&digits).map_err(|_| invalid())?;
        match bytes[..] {
            [r, g, b] => Ok(Self::opaque(r, g, b)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for ColorSample {
    type Err = MosaicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_hex(value)
    }
}

impl From<image::Rgba<u8>> for ColorSample {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self::new(r, g, b, a)
    }
}

impl From<ColorSample> for image::Rgba<u8> {
    fn from(sample: ColorSample) -> Self {
        image::Rgba(sample.rgba())
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}
