use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::corpus::{self, CorpusLoader, FileCorpusLoader};
use crate::MosaicError;

/// Glyph returned when no usable text source is available.
pub const PLACEHOLDER_GLYPH: char = 'a';

/// Anything that can supply glyphs to a renderer, one at a time.
pub trait GlyphSource {
    fn next_glyph(&mut self) -> char;
}

impl<G: GlyphSource + ?Sized> GlyphSource for &mut G {
    fn next_glyph(&mut self) -> char {
        (**self).next_glyph()
    }
}

/// Endless glyph supply cycling through one or more text corpora.
///
/// Only the active corpus is held in memory. When it is exhausted the cursor
/// wraps and, with more than one corpus, the next one is loaded through the
/// stream's [`CorpusLoader`]. If that reload fails the previously loaded
/// characters stay active and rotation is retried at the next wrap.
#[derive(Debug)]
pub struct GlyphStream<L = FileCorpusLoader> {
    corpora: Vec<PathBuf>,
    active: usize,
    chars: Vec<char>,
    offset: usize,
    loader: L,
}

impl GlyphStream<FileCorpusLoader> {
    /// Stream that returns [`PLACEHOLDER_GLYPH`] forever.
    pub fn placeholder() -> Self {
        Self::fallback(FileCorpusLoader)
    }

    /// Build a stream from an optional file or directory path.
    pub fn from_source(source: Option<&Path>) -> Result<Self, MosaicError> {
        let Some(path) = source else {
            return Ok(Self::placeholder());
        };

        let metadata = path.metadata().map_err(|source| MosaicError::TextSourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let corpora = if metadata.is_dir() {
            corpus::discover_text_files(path)?
        } else {
            vec![path.to_path_buf()]
        };

        if corpora.is_empty() {
            return Err(MosaicError::NoTextFiles(path.to_path_buf()));
        }

        Ok(Self::with_loader(corpora, FileCorpusLoader))
    }
}

impl<L: CorpusLoader> GlyphStream<L> {
    /// Build a stream over `corpora`, loading the first one eagerly.
    ///
    /// Falls back to the placeholder glyph when there are no corpora or the
    /// first one cannot be loaded or holds no usable characters.
    pub fn with_loader(corpora: Vec<PathBuf>, loader: L) -> Self {
        let Some(first) = corpora.first() else {
            return Self::fallback(loader);
        };

        match loader.load(first) {
            Ok(chars) if !chars.is_empty() => {
                debug!("glyph stream over {} corpora, starting with {}", corpora.len(), first.display());
                Self { corpora, active: 0, chars, offset: 0, loader }
            },
            Ok(_) => {
                warn!("{} has no usable characters, using placeholder glyph", first.display());
                Self::fallback(loader)
            },
            Err(err) => {
                warn!("failed to read {}: {err}, using placeholder glyph", first.display());
                Self::fallback(loader)
            },
        }
    }

    fn fallback(loader: L) -> Self {
        Self { corpora: Vec::new(), active: 0, chars: vec![PLACEHOLDER_GLYPH], offset: 0, loader }
    }

    pub fn is_placeholder(&self) -> bool {
        self.corpora.is_empty()
    }

    pub fn corpus_count(&self) -> usize {
        self.corpora.len()
    }

    /// Index of the corpus the rotation currently points at.
    pub fn active_corpus(&self) -> usize {
        self.active
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the glyph under the cursor and advance it.
    pub fn advance(&mut self) -> char {
        let Some(&glyph) = self.chars.get(self.offset) else {
            return PLACEHOLDER_GLYPH;
        };

        self.offset += 1;
        if self.offset >= self.chars.len() {
            self.offset = 0;
            if self.corpora.len() > 1 {
                self.rotate();
            }
        }

        glyph
    }

    fn rotate(&mut self) {
        self.active = (self.active + 1) % self.corpora.len();
        let path = &self.corpora[self.active];

        match self.loader.load(path) {
            Ok(chars) if !chars.is_empty() => {
                debug!("rotated glyph stream to {}", path.display());
                self.chars = chars;
            },
            Ok(_) => warn!("{} has no usable characters, keeping previous corpus", path.display()),
            Err(err) => warn!("failed to reload {}: {err}, keeping previous corpus", path.display()),
        }
    }
}

impl<L: CorpusLoader> GlyphSource for GlyphStream<L> {
    fn next_glyph(&mut self) -> char {
        self.advance()
    }
}

impl<L: CorpusLoader> Iterator for GlyphStream<L> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        Some(self.advance())
    }
}
